//! Access-filtered atom listing.
//!
//! # Invariants
//! - Hidden atoms are indistinguishable from missing ones.
//! - List order is the repository order.

use crate::access::gate::{can_see_atom, filter_accessible, AccessLevel};
use crate::model::atom::SkincareAtom;
use crate::repo::atom_repo::{AtomListQuery, AtomRepository};
use crate::repo::RepoResult;
use log::debug;

/// Read-side atom service gated by caller access level.
pub struct AtomService<R: AtomRepository> {
    repo: R,
}

impl<R: AtomRepository> AtomService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists atoms matching `query` that `access_level` may see.
    pub fn get_accessible_atoms(
        &self,
        query: &AtomListQuery,
        access_level: AccessLevel,
    ) -> RepoResult<Vec<SkincareAtom>> {
        let atoms = self.repo.list_atoms(query)?;
        let total = atoms.len();
        let visible = filter_accessible(atoms, access_level);
        debug!(
            "event=accessible_atoms module=access status=ok level={} total={} visible={}",
            access_level,
            total,
            visible.len()
        );
        Ok(visible)
    }

    /// One atom by id, or `None` when missing or hidden.
    pub fn get_visible_atom(
        &self,
        id: &str,
        access_level: AccessLevel,
    ) -> RepoResult<Option<SkincareAtom>> {
        Ok(self
            .repo
            .get_atom(id)?
            .filter(|atom| can_see_atom(access_level, atom)))
    }
}
