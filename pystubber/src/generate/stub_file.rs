use crate::{descriptor::ModuleDescriptor, generate::*, StubConfig, StubError, Warnings};
use anyhow::Result;
use std::{fs, path::Path};

/// Generated stub text of one module, with the warnings met on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct StubFile {
    pub module_name: String,
    pub text: String,
    pub warnings: Warnings,
}

impl StubFile {
    /// Parse Python `source` of module `module_name` and render its stub.
    pub fn from_source(module_name: &str, source: &str, config: &StubConfig) -> Result<Self> {
        let (descriptor, mut warnings) = ModuleDescriptor::parse(module_name, source)?;
        let stub = Self::from_descriptor(&descriptor, config)?;
        warnings.extend(stub.warnings);
        Ok(Self { warnings, ..stub })
    }

    /// Render an introspection dump serialized as JSON.
    pub fn from_json(json: &str, config: &StubConfig) -> Result<Self> {
        let descriptor = ModuleDescriptor::from_json(json)?;
        Self::from_descriptor(&descriptor, config)
    }

    pub fn from_descriptor(descriptor: &ModuleDescriptor, config: &StubConfig) -> Result<Self> {
        descriptor.validate()?;
        let mut warnings = Warnings::new();
        let module = ModuleDef::new(descriptor, config, &mut warnings);
        Ok(Self {
            module_name: descriptor.name.clone(),
            text: module.to_string(),
            warnings,
        })
    }

    pub fn write(&self, dest: impl AsRef<Path>) -> Result<()> {
        let dest = dest.as_ref();
        let io_error = |source| StubError::Io {
            path: dest.to_path_buf(),
            source,
        };
        if let Some(dir) = dest.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(io_error)?;
            }
        }
        fs::write(dest, &self.text).map_err(io_error)?;
        log::info!(
            "Generate stub file of a module `{}` at {dest}",
            self.module_name,
            dest = dest.display()
        );
        Ok(())
    }
}
