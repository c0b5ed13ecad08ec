//! Patch registry
//!
//! Records one disposer per installed interception point. Installing a point
//! that is already installed is a no-op; a point that fails to install is
//! logged and skipped without affecting the others.

use tracing::{debug, error, info, warn};

use super::{Disposer, InterceptionPoint, PatchContext, PatchError};
use crate::host::Host;

/// Result of installing one point
#[derive(Debug)]
pub enum InstallOutcome {
    Installed,
    AlreadyInstalled,
    /// Current settings exclude this point
    NotWanted,
    Failed(PatchError),
}

impl InstallOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed | InstallOutcome::AlreadyInstalled)
    }
}

/// Outcome of each point in an [`PatchManager::install_all`] pass
#[derive(Debug, Default)]
pub struct InstallReport {
    pub outcomes: Vec<(&'static str, InstallOutcome)>,
}

impl InstallReport {
    pub fn outcome(&self, point: &str) -> Option<&InstallOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| *name == point)
            .map(|(_, outcome)| outcome)
    }

    /// Number of points newly installed by this pass
    pub fn installed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, InstallOutcome::Installed))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, InstallOutcome::Failed(_)))
            .count()
    }
}

/// Registry of installed interception points
#[derive(Debug, Default)]
pub struct PatchManager {
    installed: Vec<Disposer>,
}

impl PatchManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_installed(&self, point: &str) -> bool {
        self.installed.iter().any(|d| d.point() == point)
    }

    /// Names of installed points in installation order
    pub fn installed(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.installed.iter().map(Disposer::point)
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Install one point
    pub fn install(
        &mut self,
        point: &dyn InterceptionPoint,
        host: &dyn Host,
        ctx: &PatchContext,
    ) -> InstallOutcome {
        let name = point.name();
        if self.is_installed(name) {
            debug!(point = name, "already installed");
            return InstallOutcome::AlreadyInstalled;
        }

        let Some(wanted) = ctx.with_store(|store| point.wanted(store.settings())) else {
            warn!(point = name, "store busy, install skipped until next sync");
            return InstallOutcome::NotWanted;
        };
        if !wanted {
            debug!(point = name, "not wanted by current settings");
            return InstallOutcome::NotWanted;
        }

        match point.install(host, ctx) {
            Ok(disposer) => {
                debug!(point = name, "installed");
                self.installed.push(disposer);
                InstallOutcome::Installed
            }
            Err(e @ PatchError::TargetNotFound(_)) => {
                warn!(point = name, error = %e, "interception point skipped");
                InstallOutcome::Failed(e)
            }
            Err(e) => {
                error!(point = name, error = %e, "failed to install interception point");
                InstallOutcome::Failed(e)
            }
        }
    }

    /// Install every point, continuing past failures
    pub fn install_all(
        &mut self,
        points: &[Box<dyn InterceptionPoint>],
        host: &dyn Host,
        ctx: &PatchContext,
    ) -> InstallReport {
        let outcomes = points
            .iter()
            .map(|point| (point.name(), self.install(point.as_ref(), host, ctx)))
            .collect();
        let report = InstallReport { outcomes };
        info!(
            installed = self.installed.len(),
            failed = report.failed(),
            "interception points installed"
        );
        report
    }

    /// Uninstall one point
    ///
    /// Returns `false` if it was not installed. A failing disposer is logged;
    /// the point is considered uninstalled either way.
    pub fn uninstall(&mut self, point: &str) -> bool {
        let Some(index) = self.installed.iter().position(|d| d.point() == point) else {
            return false;
        };
        let disposer = self.installed.remove(index);
        dispose_logged(disposer);
        true
    }

    /// Uninstall every point in reverse installation order
    ///
    /// Returns how many points were uninstalled.
    pub fn uninstall_all(&mut self) -> usize {
        let count = self.installed.len();
        while let Some(disposer) = self.installed.pop() {
            dispose_logged(disposer);
        }
        if count > 0 {
            info!(count, "interception points uninstalled");
        }
        count
    }

    /// Bring one point in line with current settings
    ///
    /// Installs it if wanted and missing, uninstalls it if installed and no
    /// longer wanted. Returns whether anything changed.
    pub fn sync(
        &mut self,
        point: &dyn InterceptionPoint,
        host: &dyn Host,
        ctx: &PatchContext,
    ) -> bool {
        let Some(wanted) = ctx.with_store(|store| point.wanted(store.settings())) else {
            return false;
        };
        match (wanted, self.is_installed(point.name())) {
            (true, false) => matches!(self.install(point, host, ctx), InstallOutcome::Installed),
            (false, true) => self.uninstall(point.name()),
            _ => false,
        }
    }
}

impl Drop for PatchManager {
    fn drop(&mut self) {
        self.uninstall_all();
    }
}

fn dispose_logged(disposer: Disposer) {
    let point = disposer.point();
    match disposer.dispose() {
        Ok(()) => debug!(point, "uninstalled"),
        Err(e) => error!(point, error = %e, "failed to uninstall interception point"),
    }
}
