use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::{Backend, DesignSnapshot};
use crate::codegen::{GuiTclGenerator, IpXactGenerator, QuartusTclGenerator};
use crate::config::PackagerConfig;
use crate::constants::{COMPONENT_TCL_FILE, COMPONENT_XML_FILE, GUI_DIR, GUI_FILE, SRC_DIR};
use crate::model::Component;
use crate::resolve::{InterfaceResolver, ResolverRegistry};

/// Packs a design, its HDL sources and a generated GUI script into an IP
/// core directory with `component.xml` and `component_hw.tcl`
pub struct IpCorePackager<B: Backend> {
    backend: B,
    design: DesignSnapshot,
    config: PackagerConfig,
    registry: ResolverRegistry,
    extra_files: Vec<PathBuf>,
}

impl<B: Backend> IpCorePackager<B> {
    pub fn new(backend: B, design: DesignSnapshot) -> Self {
        Self {
            backend,
            design,
            config: PackagerConfig::default(),
            registry: ResolverRegistry::with_defaults(),
            extra_files: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: PackagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_registry(mut self, registry: ResolverRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// HDL or constraint files shipped next to the converted sources
    pub fn with_extra_files(mut self, files: Vec<PathBuf>) -> Self {
        self.extra_files = files;
        self
    }

    pub fn name(&self) -> &str {
        &self.design.name
    }

    /// Resolve the design into a Component carrying `files` (relative to
    /// the package directory)
    pub fn build_component(
        &self,
        vendor: &str,
        library: &str,
        description: Option<&str>,
        files: &[String],
    ) -> Result<Component> {
        let resolver = InterfaceResolver::new(&self.backend, &self.registry, &self.config);
        let mut component = resolver
            .resolve(&self.design)
            .context(format!("Failed to resolve interfaces of {}", self.design.name))?;

        component.vendor = vendor.to_string();
        component.library = library.to_string();
        component.description = match description {
            Some(d) => d.to_string(),
            None => component.display_name(),
        };
        for file in files {
            component
                .add_file(file)
                .context(format!("Failed to register file {}", file))?;
        }

        Ok(component)
    }

    /// Create `<repo_dir>/<name>/` and return its path. An existing package
    /// directory is replaced.
    pub fn package(
        &self,
        repo_dir: &Path,
        vendor: &str,
        library: &str,
        description: Option<&str>,
    ) -> Result<PathBuf> {
        let ip_dir = repo_dir.join(&self.design.name);
        if ip_dir.exists() {
            fs::remove_dir_all(&ip_dir)
                .context(format!("Failed to remove old package: {}", ip_dir.display()))?;
        }
        let src_dir = ip_dir.join(SRC_DIR);
        let gui_dir = ip_dir.join(GUI_DIR);
        for dir in [&ip_dir, &src_dir, &gui_dir] {
            fs::create_dir_all(dir)
                .context(format!("Failed to create directory: {}", dir.display()))?;
        }
        tracing::info!("Packaging {} into {}", self.design.name, ip_dir.display());

        let mut hdl_files = self.stage_sources(&src_dir)?;
        hdl_files.sort();
        hdl_files.dedup();

        let gui_file = gui_dir.join(GUI_FILE);
        fs::write(&gui_file, GuiTclGenerator::new().generate(&self.design))
            .context(format!("Failed to write GUI script: {}", gui_file.display()))?;

        let mut files = Vec::with_capacity(hdl_files.len() + 1);
        for path in hdl_files.iter().chain(std::iter::once(&gui_file)) {
            files.push(relative_name(path, &ip_dir)?);
        }

        let component = self.build_component(vendor, library, description, &files)?;

        let clock = self.config.clock();
        let xml = IpXactGenerator::new(clock.as_ref())
            .generate(&component)
            .context("Failed to generate component.xml")?;
        let xml_path = ip_dir.join(COMPONENT_XML_FILE);
        fs::write(&xml_path, xml)
            .context(format!("Failed to write: {}", xml_path.display()))?;

        let tcl = QuartusTclGenerator::new(&self.config.quartus_version)
            .generate(&component)
            .context("Failed to generate component_hw.tcl")?;
        let tcl_path = ip_dir.join(COMPONENT_TCL_FILE);
        fs::write(&tcl_path, tcl)
            .context(format!("Failed to write: {}", tcl_path.display()))?;

        tracing::info!(
            "Wrote {} and {} ({} files)",
            xml_path.display(),
            tcl_path.display(),
            component.files.len()
        );
        Ok(ip_dir)
    }

    /// Convert the design into `<src_dir>/<name>/` and copy the extra files
    /// next to it
    fn stage_sources(&self, src_dir: &Path) -> Result<Vec<PathBuf>> {
        let hdl_dir = src_dir.join(&self.design.name);
        if hdl_dir.exists() {
            fs::remove_dir_all(&hdl_dir)
                .context(format!("Failed to wipe: {}", hdl_dir.display()))?;
        }
        fs::create_dir_all(&hdl_dir)
            .context(format!("Failed to create directory: {}", hdl_dir.display()))?;

        let mut files = self
            .backend
            .to_hdl(&self.design, &hdl_dir)
            .context(format!("HDL conversion of {} failed", self.design.name))?;

        // staged path -> file it was staged from
        let mut staged: HashMap<PathBuf, PathBuf> =
            files.iter().map(|f| (f.clone(), f.clone())).collect();
        for src in &self.extra_files {
            let file_name = src
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid extra file: {}", src.display()))?;
            let origin = fs::canonicalize(src)
                .context(format!("Extra file not found: {}", src.display()))?;
            let dst = hdl_dir.join(file_name);
            match staged.get(&dst) {
                Some(previous) if *previous == origin => {
                    tracing::debug!("Skipping duplicate extra file {}", src.display());
                    continue;
                }
                Some(previous) => bail!(
                    "Extra file {} collides with {} at {}",
                    src.display(),
                    previous.display(),
                    dst.display()
                ),
                None => {}
            }
            fs::copy(src, &dst)
                .context(format!("Failed to copy {} to {}", src.display(), dst.display()))?;
            staged.insert(dst.clone(), origin);
            files.push(dst);
        }

        tracing::info!("Staged {} source files", files.len());
        Ok(files)
    }
}

/// `/`-separated path of `path` relative to `base`
fn relative_name(path: &Path, base: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(base)
        .context(format!("{} is outside of {}", path.display(), base.display()))?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
