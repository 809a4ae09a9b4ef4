use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{encode_string_list, parse_string_list},
    models::{Package, PackageDraft},
};
use crate::error::{Error, Result};

fn row_to_package(row: &Row) -> Result<Package> {
    let inclusions: String = row.get("inclusions")?;
    let exclusions: String = row.get("exclusions")?;

    Ok(Package {
        id: row.get("id")?,
        title: row.get("title")?,
        region: row.get("region")?,
        price_from: row.get("price_from")?,
        duration_days: row.get("duration_days")?,
        itinerary: row.get("itinerary")?,
        inclusions: parse_string_list(&inclusions, "inclusions")?,
        exclusions: parse_string_list(&exclusions, "exclusions")?,
        partner_id: row.get("partner_id")?,
    })
}

const PACKAGE_COLUMNS: &str =
    "id, title, region, price_from, duration_days, itinerary, inclusions, exclusions, partner_id";

fn partner_exists(conn: &Connection, partner_id: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM partners WHERE id = ?1",
            params![partner_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

impl Database {
    /// Create a package for an existing partner.
    pub async fn create_package(&self, draft: PackageDraft) -> Result<Package> {
        draft.validate()?;

        self.execute(move |conn| {
            if !partner_exists(conn, &draft.partner_id)? {
                return Err(Error::not_found("partner", draft.partner_id.clone()));
            }

            let package = Package {
                id: Uuid::new_v4().to_string(),
                title: draft.title,
                region: draft.region,
                price_from: draft.price_from,
                duration_days: draft.duration_days,
                itinerary: draft.itinerary,
                inclusions: draft.inclusions,
                exclusions: draft.exclusions,
                partner_id: draft.partner_id,
            };

            conn.execute(
                "INSERT INTO packages (id, title, region, price_from, duration_days, \
                 itinerary, inclusions, exclusions, partner_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    package.id,
                    package.title,
                    package.region,
                    package.price_from,
                    package.duration_days,
                    package.itinerary,
                    encode_string_list(&package.inclusions)?,
                    encode_string_list(&package.exclusions)?,
                    package.partner_id,
                ],
            )?;

            Ok(package)
        })
        .await
    }

    /// Full-record edit of an existing package.
    pub async fn update_package(&self, package: Package) -> Result<Package> {
        package.validate()?;

        self.execute(move |conn| {
            if !partner_exists(conn, &package.partner_id)? {
                return Err(Error::not_found("partner", package.partner_id.clone()));
            }

            let rows_affected = conn.execute(
                "UPDATE packages
                 SET title = ?1,
                     region = ?2,
                     price_from = ?3,
                     duration_days = ?4,
                     itinerary = ?5,
                     inclusions = ?6,
                     exclusions = ?7,
                     partner_id = ?8
                 WHERE id = ?9",
                params![
                    package.title,
                    package.region,
                    package.price_from,
                    package.duration_days,
                    package.itinerary,
                    encode_string_list(&package.inclusions)?,
                    encode_string_list(&package.exclusions)?,
                    package.partner_id,
                    package.id,
                ],
            )?;

            if rows_affected == 0 {
                return Err(Error::not_found("package", package.id.clone()));
            }

            Ok(package)
        })
        .await
    }

    /// Remove a package. Existing leads keep their creation-time snapshot
    /// and are untouched.
    pub async fn delete_package(&self, package_id: &str) -> Result<()> {
        let package_id = package_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM packages WHERE id = ?1", params![package_id])?;
            if rows_affected == 0 {
                return Err(Error::not_found("package", package_id));
            }
            Ok(())
        })
        .await
    }

    pub async fn get_package(&self, package_id: &str) -> Result<Package> {
        let package_id = package_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PACKAGE_COLUMNS} FROM packages WHERE id = ?1"
            ))?;
            let row = stmt
                .query_row(params![package_id], |row| Ok(row_to_package(row)))
                .optional()?
                .transpose()?;

            row.ok_or_else(|| Error::not_found("package", package_id))
        })
        .await
    }

    pub async fn list_packages(&self) -> Result<Vec<Package>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PACKAGE_COLUMNS} FROM packages ORDER BY rowid ASC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut packages = Vec::new();
            while let Some(row) = rows.next()? {
                packages.push(row_to_package(row)?);
            }

            Ok(packages)
        })
        .await
    }
}
