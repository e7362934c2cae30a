use super::{DocumentStore, StoreError, StoreResult};
use common::model::file_record::FileRecord;
use common::model::network_function::{NetworkFunction, VersionDescriptor};
use common::model::questionnaire::{QuestionnaireSection, SectionKey};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS questionnaire (
    nf_name      TEXT NOT NULL,
    version      TEXT NOT NULL,
    section_name TEXT NOT NULL,
    questions    TEXT NOT NULL DEFAULT '[]',
    files        TEXT NOT NULL DEFAULT '[]',
    PRIMARY KEY (nf_name, version, section_name)
);
CREATE TABLE IF NOT EXISTS nf_and_version (
    nf_name  TEXT PRIMARY KEY,
    versions TEXT NOT NULL DEFAULT '[]'
);
";

/// `DocumentStore` backed by a single SQLite connection.
///
/// Array columns (`questions`, `files`, `versions`) hold JSON text. Set-style
/// updates read, modify and write the array inside one transaction while the
/// connection mutex is held.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates or replaces a network function document. Production documents are
    /// provisioned outside this service.
    #[cfg(test)]
    pub fn save_network_function(&self, network_function: &NetworkFunction) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO nf_and_version (nf_name, versions) VALUES (?1, ?2)
             ON CONFLICT (nf_name) DO UPDATE SET versions = excluded.versions",
            params![
                network_function.nf_name,
                serde_json::to_string(&network_function.versions)?
            ],
        )?;
        Ok(())
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Loads the version list of `nf_name`, applies `update` and writes it back.
    /// Returns `false` without calling `update` when the network function is unknown.
    fn update_versions<F>(&self, nf_name: &str, update: F) -> StoreResult<bool>
    where
        F: FnOnce(&mut Vec<VersionDescriptor>),
    {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let raw: Option<String> = tx
            .query_row(
                "SELECT versions FROM nf_and_version WHERE nf_name = ?1",
                params![nf_name],
                |row| row.get(0),
            )
            .optional()?;
        let Some(raw) = raw else {
            return Ok(false);
        };

        let mut versions: Vec<VersionDescriptor> = serde_json::from_str(&raw)?;
        update(&mut versions);
        tx.execute(
            "UPDATE nf_and_version SET versions = ?1 WHERE nf_name = ?2",
            params![serde_json::to_string(&versions)?, nf_name],
        )?;
        tx.commit()?;
        Ok(true)
    }
}

impl DocumentStore for SqliteStore {
    fn find_sections(
        &self,
        nf_name: &str,
        version: &str,
        section_name: Option<&str>,
    ) -> StoreResult<Vec<QuestionnaireSection>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT nf_name, version, section_name, questions, files FROM questionnaire
             WHERE nf_name = ?1 AND version = ?2 AND (?3 IS NULL OR section_name = ?3)
             ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map(params![nf_name, version, section_name], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(
                |(nf_name, version, section_name, questions, files)| -> StoreResult<_> {
                    Ok(QuestionnaireSection {
                        nf_name,
                        version,
                        section_name,
                        questions: serde_json::from_str(&questions)?,
                        files: serde_json::from_str(&files)?,
                    })
                },
            )
            .collect()
    }

    fn upsert_questions(&self, key: &SectionKey, questions: &[Value]) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO questionnaire (nf_name, version, section_name, questions)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (nf_name, version, section_name)
             DO UPDATE SET questions = excluded.questions",
            params![
                key.nf_name,
                key.version,
                key.section_name,
                serde_json::to_string(questions)?
            ],
        )?;
        Ok(())
    }

    fn add_file(&self, key: &SectionKey, record: &FileRecord) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let raw: Option<String> = tx
            .query_row(
                "SELECT files FROM questionnaire
                 WHERE nf_name = ?1 AND version = ?2 AND section_name = ?3",
                params![key.nf_name, key.version, key.section_name],
                |row| row.get(0),
            )
            .optional()?;
        let mut files: Vec<FileRecord> = match raw {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        if files.contains(record) {
            return Ok(false);
        }
        files.push(record.clone());

        tx.execute(
            "INSERT INTO questionnaire (nf_name, version, section_name, files)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (nf_name, version, section_name)
             DO UPDATE SET files = excluded.files",
            params![
                key.nf_name,
                key.version,
                key.section_name,
                serde_json::to_string(&files)?
            ],
        )?;
        tx.commit()?;
        Ok(true)
    }

    fn remove_files(&self, key: &SectionKey, filename: &str) -> StoreResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let raw: Option<String> = tx
            .query_row(
                "SELECT files FROM questionnaire
                 WHERE nf_name = ?1 AND version = ?2 AND section_name = ?3",
                params![key.nf_name, key.version, key.section_name],
                |row| row.get(0),
            )
            .optional()?;
        let Some(raw) = raw else {
            return Ok(0);
        };

        let mut files: Vec<FileRecord> = serde_json::from_str(&raw)?;
        let before = files.len();
        files.retain(|file| file.filename != filename);
        let removed = before - files.len();

        if removed > 0 {
            tx.execute(
                "UPDATE questionnaire SET files = ?1
                 WHERE nf_name = ?2 AND version = ?3 AND section_name = ?4",
                params![
                    serde_json::to_string(&files)?,
                    key.nf_name,
                    key.version,
                    key.section_name
                ],
            )?;
            tx.commit()?;
        }
        Ok(removed)
    }

    fn list_network_functions(&self) -> StoreResult<Vec<NetworkFunction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT nf_name, versions FROM nf_and_version ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(nf_name, versions)| -> StoreResult<_> {
                Ok(NetworkFunction {
                    nf_name,
                    versions: serde_json::from_str(&versions)?,
                })
            })
            .collect()
    }

    fn set_version_state(
        &self,
        nf_name: &str,
        version: &str,
        status: &str,
        latest: bool,
    ) -> StoreResult<()> {
        self.update_versions(nf_name, |versions| {
            for descriptor in versions.iter_mut().filter(|v| v.name == version) {
                descriptor.status = status.to_string();
                descriptor.latest = latest;
            }
        })?;
        Ok(())
    }

    fn clear_latest(&self, nf_name: &str) -> StoreResult<()> {
        self.update_versions(nf_name, |versions| {
            for descriptor in versions.iter_mut() {
                descriptor.latest = false;
            }
        })?;
        Ok(())
    }

    fn mark_latest(&self, nf_name: &str, version: &str) -> StoreResult<()> {
        self.update_versions(nf_name, |versions| {
            for descriptor in versions.iter_mut().filter(|v| v.name == version) {
                descriptor.latest = true;
            }
        })?;
        Ok(())
    }

    fn add_version(&self, nf_name: &str, version: &VersionDescriptor) -> StoreResult<bool> {
        self.update_versions(nf_name, |versions| {
            if !versions.contains(version) {
                versions.push(version.clone());
            }
        })
    }
}
