//! Installation coordinator.
//!
//! An [`InterceptionBuilder`] is one installation unit: a single interception
//! function shared by one or more target paths, installed exactly once.
//! Callers needing different behavior per path either create several units or
//! branch on [`InterceptionContext::target`] inside the function.
//!
//! [`InterceptionContext::target`]: crate::intercept::InterceptionContext::target

use crate::command::Command;
use crate::error::InterceptError;
use crate::host::CommandHost;
use crate::intercept::context::InterceptionContext;
use crate::intercept::propagate::propagate_excluding;
use crate::intercept::resolve::resolve;
use crate::intercept::slot::read_command;
use crate::intercept::wrapper::{InterceptFn, Interception};
use crate::path::TargetPath;
use crate::types::ResultCode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// How `install` behaves when a later path fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Process paths in order and stop at the first failure. Paths processed
    /// before the failure stay intercepted; there is no rollback.
    #[default]
    Sequential,
    /// Resolve and read every path first; write nothing unless all succeed.
    Atomic,
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMode::Sequential => f.write_str("sequential"),
            InstallMode::Atomic => f.write_str("atomic"),
        }
    }
}

/// Outcome for one configured path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome<N> {
    pub path: TargetPath,
    pub node: N,
    /// Nodes that received the wrapper, primary first. Empty when skipped.
    pub written: Vec<N>,
    /// The node had already been intercepted earlier in the same run.
    pub already_intercepted: bool,
}

/// Summary of a successful installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport<N> {
    pub mode: InstallMode,
    pub targets: Vec<TargetOutcome<N>>,
}

impl<N> InstallReport<N> {
    /// Total number of node slots written.
    pub fn nodes_written(&self) -> usize {
        self.targets.iter().map(|t| t.written.len()).sum()
    }
}

enum BuilderState<C> {
    Configuring {
        targets: Vec<TargetPath>,
        interception: Option<InterceptFn<C>>,
    },
    Installed,
}

/// One-shot builder: configure, then `install` once.
pub struct InterceptionBuilder<C> {
    state: BuilderState<C>,
    mode: InstallMode,
}

impl<C: 'static> Default for InterceptionBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> InterceptionBuilder<C> {
    pub fn new() -> Self {
        Self {
            state: BuilderState::Configuring {
                targets: Vec::new(),
                interception: None,
            },
            mode: InstallMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: InstallMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_mode(&mut self, mode: InstallMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> InstallMode {
        self.mode
    }

    pub fn is_installed(&self) -> bool {
        matches!(self.state, BuilderState::Installed)
    }

    /// Paths registered so far, in registration order.
    pub fn targets(&self) -> &[TargetPath] {
        match &self.state {
            BuilderState::Configuring { targets, .. } => targets,
            BuilderState::Installed => &[],
        }
    }

    /// Register the interception function. Registering again before
    /// installation replaces the previous function.
    pub fn interception<F>(&mut self, f: F) -> Result<(), InterceptError>
    where
        F: Fn(&InterceptionContext<'_, C>) -> ResultCode + Send + Sync + 'static,
    {
        match &mut self.state {
            BuilderState::Installed => Err(InterceptError::AlreadyConfigured),
            BuilderState::Configuring { interception, .. } => {
                if interception.is_some() {
                    debug!("Replacing previously registered interception function");
                }
                *interception = Some(Arc::new(f));
                Ok(())
            }
        }
    }

    /// Register a target path given as segments.
    pub fn path<I, S>(&mut self, segments: I) -> Result<(), InterceptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.is_installed() {
            return Err(InterceptError::AlreadyConfigured);
        }
        let path = TargetPath::new(segments)?;
        self.target(path)
    }

    /// Register an already-built target path.
    pub fn target(&mut self, path: TargetPath) -> Result<(), InterceptError> {
        match &mut self.state {
            BuilderState::Installed => Err(InterceptError::AlreadyConfigured),
            BuilderState::Configuring { targets, .. } => {
                targets.push(path);
                Ok(())
            }
        }
    }

    /// Check that every registered path resolves to an executable node,
    /// without writing anything or closing the unit.
    pub fn validate<H>(&self, host: &H) -> Result<(), InterceptError>
    where
        H: CommandHost<Context = C>,
    {
        match &self.state {
            BuilderState::Installed => Err(InterceptError::AlreadyInstalled),
            BuilderState::Configuring { targets, .. } => {
                for path in targets {
                    plan_target(host, path)?;
                }
                Ok(())
            }
        }
    }

    /// Install the interception on every registered path.
    ///
    /// The unit closes as soon as this is called, whatever the outcome: a
    /// second call fails with [`InterceptError::AlreadyInstalled`] and further
    /// registrations fail with [`InterceptError::AlreadyConfigured`].
    #[instrument(skip_all, fields(mode = %self.mode))]
    pub fn install<H>(&mut self, host: &mut H) -> Result<InstallReport<H::Node>, InterceptError>
    where
        H: CommandHost<Context = C>,
    {
        let (targets, interception) = match std::mem::replace(&mut self.state, BuilderState::Installed) {
            BuilderState::Installed => return Err(InterceptError::AlreadyInstalled),
            BuilderState::Configuring {
                targets,
                interception,
            } => (targets, interception),
        };

        let interception = interception.ok_or(InterceptError::MissingInterceptionFunction)?;
        if targets.is_empty() {
            return Err(InterceptError::NoTargetsConfigured);
        }

        let report = match self.mode {
            InstallMode::Sequential => install_sequential(host, &interception, targets),
            InstallMode::Atomic => install_atomic(host, &interception, targets),
        };

        match &report {
            Ok(report) => info!(
                targets = report.targets.len(),
                nodes_written = report.nodes_written(),
                "Interception installed"
            ),
            Err(e) => warn!(error = %e, "Interception install failed"),
        }
        report
    }
}

struct Planned<N, C> {
    path: TargetPath,
    node: N,
    original: Command<C>,
}

fn plan_target<H: CommandHost>(
    host: &H,
    path: &TargetPath,
) -> Result<Planned<H::Node, H::Context>, InterceptError> {
    let node = resolve(host, path)?;
    let original = read_command(host, node, path)?;
    Ok(Planned {
        path: path.clone(),
        node,
        original,
    })
}

fn install_sequential<H: CommandHost>(
    host: &mut H,
    interception: &InterceptFn<H::Context>,
    targets: Vec<TargetPath>,
) -> Result<InstallReport<H::Node>, InterceptError> {
    let mut intercepted = HashSet::new();
    let mut outcomes = Vec::with_capacity(targets.len());
    for path in targets {
        let node = resolve(host, &path)?;
        if intercepted.contains(&node) {
            outcomes.push(skipped(path, node));
            continue;
        }
        let original = read_command(host, node, &path)?;
        outcomes.push(apply(
            host,
            interception,
            Planned {
                path,
                node,
                original,
            },
            &mut intercepted,
        ));
    }
    Ok(InstallReport {
        mode: InstallMode::Sequential,
        targets: outcomes,
    })
}

fn install_atomic<H: CommandHost>(
    host: &mut H,
    interception: &InterceptFn<H::Context>,
    targets: Vec<TargetPath>,
) -> Result<InstallReport<H::Node>, InterceptError> {
    let plan = targets
        .iter()
        .map(|path| plan_target(host, path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut intercepted = HashSet::new();
    let outcomes = plan
        .into_iter()
        .map(|planned| {
            if intercepted.contains(&planned.node) {
                skipped(planned.path, planned.node)
            } else {
                apply(host, interception, planned, &mut intercepted)
            }
        })
        .collect();
    Ok(InstallReport {
        mode: InstallMode::Atomic,
        targets: outcomes,
    })
}

fn apply<H: CommandHost>(
    host: &mut H,
    interception: &InterceptFn<H::Context>,
    planned: Planned<H::Node, H::Context>,
    intercepted: &mut HashSet<H::Node>,
) -> TargetOutcome<H::Node> {
    let wrapper = Interception::new(
        Arc::clone(interception),
        planned.original,
        planned.path.clone(),
    )
    .into_command();
    let propagation = propagate_excluding(host, planned.node, &wrapper, intercepted);
    intercepted.extend(propagation.visited.iter().copied());
    debug!(
        path = %planned.path,
        node = ?planned.node,
        variants = propagation.len() - 1,
        "Intercepted target"
    );
    TargetOutcome {
        path: planned.path,
        node: planned.node,
        written: propagation.visited,
        already_intercepted: false,
    }
}

fn skipped<N: fmt::Debug>(path: TargetPath, node: N) -> TargetOutcome<N> {
    debug!(path = %path, node = ?node, "Target already intercepted in this run");
    TargetOutcome {
        path,
        node,
        written: Vec::new(),
        already_intercepted: true,
    }
}
