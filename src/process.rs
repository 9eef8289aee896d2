//! # Orchestrator
//!
//! [`Apache2Process`] runs one configuration section against the Apache 2
//! tree:
//!
//! 1.  **Validate** the section's required keys. A missing key is a build
//!     defect and is returned as an error before anything else happens.
//! 2.  **Load** the override file named by `configuration_file_name` from the
//!     input directory. A missing or malformed file is logged and the run
//!     ends successfully without touching the filesystem.
//! 3.  **Translate** every loaded value through the optional
//!     [`ValueTranslator`].
//! 4.  **Rewrite** the tree for each recognised key, in a fixed order:
//!     document root, compression, fancy indexing.

use crate::error::Result;
use crate::layout::ApacheLayout;
use crate::overrides::{self, FileFormat, OverrideValues};
use crate::rewrite::compression::{self, CompressionOutcome, GZIP_KEY};
use crate::rewrite::document_root::{self, DocumentRootOutcome, DOCUMENT_ROOT_KEY};
use crate::rewrite::fancy_indexing::{self, FANCY_INDEXING_KEY};
use crate::section::ConfigSection;
use crate::translator::ValueTranslator;
use log::{debug, error, info};
use std::path::Path;

/// What a single run applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Format of the loaded override file; `None` when loading failed and
    /// nothing was configured
    pub format: Option<FileFormat>,
    /// Override values after translation
    pub values: OverrideValues,
    pub document_root: Option<DocumentRootOutcome>,
    pub compression: Option<CompressionOutcome>,
    pub fancy_indexing: Option<bool>,
}

impl ProcessReport {
    /// Whether the run stopped early because the override file could not be loaded
    pub fn skipped(&self) -> bool {
        self.format.is_none()
    }
}

/// Applies override files to an Apache 2 configuration tree
pub struct Apache2Process {
    layout: ApacheLayout,
    legacy_document_root: Option<String>,
    translator: Option<Box<dyn ValueTranslator>>,
}

impl Apache2Process {
    pub fn new(layout: ApacheLayout) -> Self {
        Self {
            layout,
            legacy_document_root: None,
            translator: None,
        }
    }

    /// Set the legacy `DOCUMENT_ROOT` environment value used for the conflict check
    pub fn with_legacy_document_root(mut self, value: Option<String>) -> Self {
        self.legacy_document_root = value;
        self
    }

    /// Run every override value through `translator` before applying it
    pub fn with_translator<T>(mut self, translator: T) -> Self
    where
        T: ValueTranslator + 'static,
    {
        self.translator = Some(Box::new(translator));
        self
    }

    pub fn layout(&self) -> &ApacheLayout {
        &self.layout
    }

    /// Apply `section`, reading its override file from `directory`
    pub fn process(&self, section: &ConfigSection, directory: &Path) -> Result<ProcessReport> {
        section.validate()?;
        let file_name = section.configuration_file_name()?;
        info!("Configuring {}", section.name);

        let (values, format) = match overrides::read_custom_file(directory.join(file_name)) {
            Ok(loaded) => loaded,
            Err(e) if e.is_recoverable() => {
                error!("{}", e);
                info!("Not configuring {} (not a critical failure)", section.name);
                return Ok(ProcessReport::default());
            }
            Err(e) => return Err(e),
        };
        debug!("Loaded {} override values from {} file", values.len(), format);

        let values = self.translate(values);
        let mut report = ProcessReport {
            format: Some(format),
            ..ProcessReport::default()
        };

        if let Some(value) = values.get(DOCUMENT_ROOT_KEY) {
            report.document_root = Some(document_root::apply(
                &self.layout,
                value,
                self.legacy_document_root.as_deref(),
            )?);
        }

        if let Some(value) = values.get(GZIP_KEY) {
            report.compression = Some(compression::apply(&self.layout, value)?);
        }

        if let Some(value) = values.get(FANCY_INDEXING_KEY) {
            report.fancy_indexing = Some(fancy_indexing::apply(&self.layout, value)?);
        }

        report.values = values;
        Ok(report)
    }

    fn translate(&self, values: OverrideValues) -> OverrideValues {
        match &self.translator {
            Some(translator) => values
                .into_iter()
                .map(|(key, value)| {
                    let translated = translator.translate(&key, &value);
                    (key, translated)
                })
                .collect(),
            None => values,
        }
    }
}
