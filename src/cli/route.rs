//! CLI route: single route table and run context. Dispatches to the tree,
//! the interception builder and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_check_text, format_run_json, format_run_text, format_tree_json, format_tree_text,
    RunSummary,
};
use crate::config::{ConfigLoader, InterceptPolicy, SpliceConfig};
use crate::error::{ApiError, InterceptError};
use crate::intercept::{InstallMode, InterceptionBuilder, InterceptionContext};
use crate::path::TargetPath;
use crate::tree::builder::{TreeBuilder, TreeManifest};
use crate::tree::invocation::Invocation;
use crate::tree::walker::{Walker, WalkerConfig};
use crate::tree::CommandTree;
use crate::types::ResultCode;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runtime context for CLI execution: workspace, resolved config and manifest.
pub struct RunContext {
    config: SpliceConfig,
    manifest_path: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root, optional config path and
    /// optional manifest override.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        manifest: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        let manifest_path = match manifest {
            Some(path) => path,
            None => config.manifest_path(&workspace_root),
        };
        debug!(manifest = %manifest_path.display(), "Resolved manifest");
        Ok(Self {
            config,
            manifest_path,
        })
    }

    pub fn config(&self) -> &SpliceConfig {
        &self.config
    }

    /// Execute a command.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let start = Instant::now();
        let name = crate::cli::command_name(command);
        let result = self.dispatch(command);
        match &result {
            Ok(_) => info!(
                command = name,
                duration_ms = start.elapsed().as_millis(),
                "Command finished"
            ),
            Err(e) => warn!(command = name, error = %e, "Command failed"),
        }
        result
    }

    fn dispatch(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Tree { format, max_depth } => {
                let tree = self.load_tree()?;
                let entries = Walker::with_config(
                    &tree,
                    WalkerConfig {
                        max_depth: *max_depth,
                        include_detached: true,
                    },
                )
                .walk();
                if format == "json" {
                    format_tree_json(&entries)
                } else {
                    Ok(format_tree_text(&entries))
                }
            }
            Commands::Check { intercept } => {
                let tree = self.load_tree()?;
                let targets = self.targets(intercept)?;
                if targets.is_empty() {
                    return Err(InterceptError::NoTargetsConfigured.into());
                }
                let mut builder = InterceptionBuilder::<Invocation>::new();
                for path in &targets {
                    builder.target(path.clone())?;
                }
                builder.validate(&tree)?;
                let names: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
                Ok(format_check_text(&names))
            }
            Commands::Run {
                intercept,
                atomic,
                sender,
                format,
                words,
            } => {
                let mut tree = self.load_tree()?;
                let targets = self.targets(intercept)?;
                let mode = if *atomic {
                    InstallMode::Atomic
                } else {
                    self.config.install.mode
                };

                let mut summary = RunSummary {
                    input: words.join(" "),
                    sender: sender.clone(),
                    mode: None,
                    policy: None,
                    targets: Vec::new(),
                    result: 0,
                    output: Vec::new(),
                };

                if targets.is_empty() {
                    debug!("No interception targets; dispatching without interception");
                } else {
                    let mut builder = InterceptionBuilder::new().with_mode(mode);
                    for path in targets {
                        builder.target(path)?;
                    }
                    builder.interception(policy_interception(
                        self.config.install.policy,
                        self.config.install.blocked_result,
                    ))?;
                    let report = builder.install(&mut tree)?;
                    summary.mode = Some(mode.to_string());
                    summary.policy = Some(policy_name(self.config.install.policy).to_string());
                    summary.targets = RunSummary::targets_from(&report);
                }

                let invocation = Invocation::new(summary.input.clone(), sender.clone());
                summary.result = tree.execute(words, &invocation)?;
                summary.output = invocation.lines();

                if format == "json" {
                    format_run_json(&summary)
                } else {
                    Ok(format_run_text(&summary))
                }
            }
        }
    }

    fn load_tree(&self) -> Result<CommandTree<Invocation>, ApiError> {
        let manifest = TreeManifest::load(&self.manifest_path)?;
        Ok(TreeBuilder::new(manifest).build()?)
    }

    /// Targets from the command line, or the configured defaults when none
    /// were given.
    fn targets(&self, raw: &[String]) -> Result<Vec<TargetPath>, ApiError> {
        if raw.is_empty() {
            return self
                .config
                .install
                .target_paths()
                .map_err(|e| ApiError::ConfigError(e.to_string()));
        }
        raw.iter()
            .map(|r| TargetPath::parse(r).map_err(ApiError::from))
            .collect()
    }
}

fn policy_name(policy: InterceptPolicy) -> &'static str {
    match policy {
        InterceptPolicy::Audit => "audit",
        InterceptPolicy::Block => "block",
    }
}

/// Interception function for a configured policy.
fn policy_interception(
    policy: InterceptPolicy,
    blocked_result: ResultCode,
) -> impl Fn(&InterceptionContext<'_, Invocation>) -> ResultCode + Send + Sync + 'static {
    move |ic: &InterceptionContext<'_, Invocation>| {
        let invocation = ic.context();
        match policy {
            InterceptPolicy::Audit => {
                invocation.emit(format!(
                    "[intercept] {} invoked by {}",
                    ic.target(),
                    invocation.sender()
                ));
                let result = ic.run_original();
                invocation.emit(format!("[intercept] {} returned {}", ic.target(), result));
                info!(target_path = %ic.target(), sender = invocation.sender(), result, "Intercepted invocation");
                result
            }
            InterceptPolicy::Block => {
                invocation.emit(format!(
                    "[intercept] {} blocked for {}",
                    ic.target(),
                    invocation.sender()
                ));
                info!(target_path = %ic.target(), sender = invocation.sender(), "Blocked invocation");
                blocked_result
            }
        }
    }
}
