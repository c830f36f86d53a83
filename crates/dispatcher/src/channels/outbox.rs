//! OutboxChannel - appends every delivery to a JSON-lines file

use chrono::{SecondsFormat, Utc};
use contracts::{ContractError, DeliveryChannel, PARAM_PATH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// One line of the outbox file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxRecord {
    pub channel: String,
    /// RFC 3339, UTC
    pub delivered_at: String,
    pub text: String,
}

/// Channel that records deliveries on disk
pub struct OutboxChannel {
    name: String,
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl OutboxChannel {
    /// Create a new OutboxChannel; the file is opened on first delivery
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            writer: None,
        }
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let path = params.get(PARAM_PATH).ok_or_else(|| {
            ContractError::config_validation(
                format!("channels[{name}].params.{PARAM_PATH}"),
                "outbox channel requires a path",
            )
        })?;
        Ok(Self::new(name, path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer(&mut self) -> std::io::Result<&mut BufWriter<File>> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?;
                debug!(channel = %self.name, path = %self.path.display(), "Outbox opened");
                BufWriter::new(file)
            }
        };
        Ok(self.writer.insert(writer))
    }

    fn append(&mut self, text: &str) -> std::io::Result<()> {
        let record = OutboxRecord {
            channel: self.name.clone(),
            delivered_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            text: text.to_string(),
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let writer = self.writer()?;
        writeln!(writer, "{line}")?;
        writer.flush()
    }
}

impl DeliveryChannel for OutboxChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn destination(&self) -> Option<&str> {
        self.path.to_str()
    }

    #[instrument(
        name = "outbox_channel_deliver",
        skip(self, text),
        fields(channel = %self.name)
    )]
    fn deliver(&mut self, text: &str) -> Result<(), ContractError> {
        self.append(text).map_err(|e| {
            // Reopen on the next delivery
            self.writer = None;
            ContractError::delivery(
                &self.name,
                format!("outbox write to {} failed: {e}", self.path.display()),
            )
        })
    }
}
