use super::Store;
use chrono::Utc;
use common::model::submission::FormSubmission;
use rusqlite::types::Type;
use rusqlite::{params, Row};
use serde_json::{Map, Value};

fn submission_from_row(row: &Row) -> rusqlite::Result<FormSubmission> {
    let raw: String = row.get(2)?;
    let data: Map<String, Value> = serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(FormSubmission {
        id: row.get(0)?,
        template_id: row.get(1)?,
        data,
        submitted_at: row.get(3)?,
    })
}

impl Store {
    /// Records an accepted submission. `data` must already be cleaned.
    pub fn create_submission(
        &self,
        template_id: i64,
        data: Map<String, Value>,
    ) -> rusqlite::Result<FormSubmission> {
        let raw = serde_json::to_string(&data)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let submitted_at = Utc::now();

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO form_submissions (template_id, data, submitted_at) VALUES (?1, ?2, ?3)",
            params![template_id, raw, submitted_at],
        )?;
        Ok(FormSubmission {
            id: conn.last_insert_rowid(),
            template_id,
            data,
            submitted_at,
        })
    }

    /// Submissions of one template, newest first.
    pub fn submissions_for(&self, template_id: i64) -> rusqlite::Result<Vec<FormSubmission>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, template_id, data, submitted_at FROM form_submissions
             WHERE template_id = ?1 ORDER BY submitted_at DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![template_id], submission_from_row)?;
        rows.collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::store::test_support::temp_store;
    use serde_json::json;

    #[test]
    fn stores_cleaned_data() {
        let (_dir, store) = temp_store();
        let template = store.create_template("Signup", &json!([]), true).unwrap();
        let data = json!({"age": 30, "news": false}).as_object().cloned().unwrap();

        let saved = store.create_submission(template.id, data.clone()).unwrap();
        let listed = store.submissions_for(template.id).unwrap();
        assert_eq!(listed, vec![saved]);
        assert_eq!(listed[0].data, data);
    }

    #[test]
    fn deleting_template_cascades() {
        let (_dir, store) = temp_store();
        let template = store.create_template("Signup", &json!([]), true).unwrap();
        store.create_submission(template.id, Default::default()).unwrap();
        store.create_submission(template.id, Default::default()).unwrap();

        assert!(store.delete_template(template.id).unwrap());
        assert!(store.submissions_for(template.id).unwrap().is_empty());
        assert!(!store.delete_template(template.id).unwrap());
    }

    #[test]
    fn submission_needs_existing_template() {
        let (_dir, store) = temp_store();
        assert!(store.create_submission(42, Default::default()).is_err());
    }
}
