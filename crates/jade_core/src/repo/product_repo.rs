//! Product taxonomy repository.
//!
//! # Responsibility
//! - Read taxonomy records and ingredient lists for tensor extraction.
//! - Store list-valued columns as JSON arrays.

use super::{RepoError, RepoResult};
use crate::model::taxonomy::{ProductProfile, ProductTaxonomy, ProfessionalLevel, UsageTime};
use rusqlite::{params, Connection, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT
    product_id,
    category,
    function_ids,
    concern_ids,
    target_area_ids,
    formulation_base,
    professional_level,
    usage_time,
    ingredients
FROM products";

/// Lookup interface over product taxonomy.
pub trait ProductRepository {
    fn upsert_product(&self, profile: &ProductProfile) -> RepoResult<()>;
    fn get_product(&self, product_id: &str) -> RepoResult<Option<ProductProfile>>;
    /// All products ordered by id.
    fn list_products(&self) -> RepoResult<Vec<ProductProfile>>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn upsert_product(&self, profile: &ProductProfile) -> RepoResult<()> {
        let taxonomy = &profile.taxonomy;
        if taxonomy.product_id.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "product_id must not be blank".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO products (
                product_id,
                category,
                function_ids,
                concern_ids,
                target_area_ids,
                formulation_base,
                professional_level,
                usage_time,
                ingredients
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(product_id) DO UPDATE SET
                category = excluded.category,
                function_ids = excluded.function_ids,
                concern_ids = excluded.concern_ids,
                target_area_ids = excluded.target_area_ids,
                formulation_base = excluded.formulation_base,
                professional_level = excluded.professional_level,
                usage_time = excluded.usage_time,
                ingredients = excluded.ingredients;",
            params![
                taxonomy.product_id.as_str(),
                taxonomy.category.as_deref(),
                encode_list(&taxonomy.function_ids)?,
                encode_list(&taxonomy.concern_ids)?,
                encode_list(&taxonomy.target_area_ids)?,
                taxonomy.formulation_base.as_deref(),
                taxonomy.professional_level.map(ProfessionalLevel::as_str),
                taxonomy.usage_time.map(UsageTime::as_str),
                encode_list(&profile.ingredients)?,
            ],
        )?;
        Ok(())
    }

    fn get_product(&self, product_id: &str) -> RepoResult<Option<ProductProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE product_id = ?1;"))?;
        let mut rows = stmt.query([product_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }
        Ok(None)
    }

    fn list_products(&self) -> RepoResult<Vec<ProductProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY product_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut products = Vec::new();
        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }
        Ok(products)
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<ProductProfile> {
    let professional_level = match row.get::<_, Option<String>>("professional_level")? {
        Some(value) => Some(ProfessionalLevel::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid professional level `{value}` in products.professional_level"
            ))
        })?),
        None => None,
    };
    let usage_time = match row.get::<_, Option<String>>("usage_time")? {
        Some(value) => Some(UsageTime::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid usage time `{value}` in products.usage_time"
            ))
        })?),
        None => None,
    };

    Ok(ProductProfile {
        taxonomy: ProductTaxonomy {
            product_id: row.get("product_id")?,
            category: row.get("category")?,
            function_ids: decode_list(row, "function_ids")?,
            concern_ids: decode_list(row, "concern_ids")?,
            target_area_ids: decode_list(row, "target_area_ids")?,
            formulation_base: row.get("formulation_base")?,
            professional_level,
            usage_time,
        },
        ingredients: decode_list(row, "ingredients")?,
    })
}

fn encode_list(values: &[String]) -> RepoResult<String> {
    serde_json::to_string(values)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode list: {err}")))
}

fn decode_list(row: &Row<'_>, column: &str) -> RepoResult<Vec<String>> {
    let text: String = row.get(column)?;
    serde_json::from_str(&text).map_err(|err| {
        RepoError::InvalidData(format!("invalid JSON list in products.{column}: {err}"))
    })
}
