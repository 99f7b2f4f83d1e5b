use super::Store;
use chrono::Utc;
use common::model::template::FormTemplate;
use rusqlite::{params, OptionalExtension, Row};
use serde_json::Value;

const COLUMNS: &str = "id, name, fields, created_at, is_active";

/// What an import did with one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created(i64),
    Updated(i64),
}

fn template_from_row(row: &Row) -> rusqlite::Result<FormTemplate> {
    Ok(FormTemplate {
        id: row.get(0)?,
        name: row.get(1)?,
        fields: row.get(2)?,
        created_at: row.get(3)?,
        is_active: row.get(4)?,
    })
}

impl Store {
    pub fn template(&self, id: i64) -> rusqlite::Result<Option<FormTemplate>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM form_templates WHERE id = ?1"),
            params![id],
            template_from_row,
        )
        .optional()
    }

    /// Like [`Store::template`], but inactive templates are reported as missing.
    pub fn active_template(&self, id: i64) -> rusqlite::Result<Option<FormTemplate>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM form_templates WHERE id = ?1 AND is_active = 1"),
            params![id],
            template_from_row,
        )
        .optional()
    }

    /// Active templates, newest first.
    pub fn active_templates(&self) -> rusqlite::Result<Vec<FormTemplate>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM form_templates WHERE is_active = 1
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], template_from_row)?;
        rows.collect()
    }

    /// Every template, newest first, optionally filtered by a case-insensitive
    /// substring of the name.
    pub fn templates(&self, search: Option<&str>) -> rusqlite::Result<Vec<FormTemplate>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM form_templates
             WHERE ?1 IS NULL OR instr(lower(name), lower(?1)) > 0
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![search], template_from_row)?;
        rows.collect()
    }

    /// Every template in creation order, as written by `export`.
    pub fn templates_by_id(&self) -> rusqlite::Result<Vec<FormTemplate>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM form_templates ORDER BY id"))?;
        let rows = stmt.query_map([], template_from_row)?;
        rows.collect()
    }

    pub fn create_template(
        &self,
        name: &str,
        fields: &Value,
        is_active: bool,
    ) -> rusqlite::Result<FormTemplate> {
        let conn = self.connect()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO form_templates (name, fields, created_at, is_active)
             VALUES (?1, ?2, ?3, ?4)",
            params![name, fields, created_at, is_active],
        )?;
        Ok(FormTemplate {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            fields: fields.clone(),
            created_at,
            is_active,
        })
    }

    /// Replaces name, fields and flag of an existing template. `created_at`
    /// is left as it was. Returns `None` when no template has this id.
    pub fn update_template(
        &self,
        id: i64,
        name: &str,
        fields: &Value,
        is_active: bool,
    ) -> rusqlite::Result<Option<FormTemplate>> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE form_templates SET name = ?1, fields = ?2, is_active = ?3 WHERE id = ?4",
            params![name, fields, is_active, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.template(id)
    }

    /// Deletes a template; its submissions go with it.
    pub fn delete_template(&self, id: i64) -> rusqlite::Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM form_templates WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Sets the fields of the template called `name`, creating it when there
    /// is none. With several templates of that name the oldest is updated.
    pub fn upsert_template_by_name(&self, name: &str, fields: &Value) -> rusqlite::Result<Upsert> {
        let conn = self.connect()?;
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM form_templates WHERE name = ?1 ORDER BY id LIMIT 1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        match existing {
            Some(id) => {
                conn.execute(
                    "UPDATE form_templates SET fields = ?1 WHERE id = ?2",
                    params![fields, id],
                )?;
                Ok(Upsert::Updated(id))
            }
            None => {
                conn.execute(
                    "INSERT INTO form_templates (name, fields, created_at, is_active)
                     VALUES (?1, ?2, ?3, 1)",
                    params![name, fields, Utc::now()],
                )?;
                Ok(Upsert::Created(conn.last_insert_rowid()))
            }
        }
    }
}
