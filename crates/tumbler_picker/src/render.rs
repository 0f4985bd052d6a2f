//! Rendering adapter
//!
//! The picker core never touches host widgets. It pushes labels and projected
//! item transforms through a [`RenderSurface`]; hosts implement the trait on
//! top of their widget tree. [`MemorySurface`] is a headless implementation
//! used by tests and the command-line driver.

use std::fmt::Write as _;

use smallvec::SmallVec;

use crate::column::ColumnKind;
use crate::config::Container;
use crate::projector::ItemTransform;

/// Handle of a resolved mount point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// Static description of a column handed to the surface at mount time
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub kind: ColumnKind,
    pub labels: Vec<String>,
}

/// Host side of the picker
pub trait RenderSurface {
    /// Find the mount point; `None` aborts construction
    fn resolve(&mut self, container: &Container) -> Option<ContainerId>;

    /// Create the column elements and attach input listeners
    fn mount(&mut self, container: ContainerId, columns: &[ColumnView]);

    /// Replace the labels of a column after its values changed
    fn relabel(&mut self, column: usize, labels: &[String]);

    /// Apply projected transforms, one per label
    fn present(&mut self, column: usize, items: &[ItemTransform]);

    /// Detach listeners and remove every element created by `mount`
    fn unmount(&mut self, container: ContainerId);
}

#[derive(Debug, Clone, Default)]
struct MountedColumn {
    view: Option<ColumnView>,
    items: Vec<ItemTransform>,
}

/// Headless surface keeping the latest state of every column in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    known: SmallVec<[Container; 2]>,
    mounted: Option<ContainerId>,
    listening: bool,
    columns: Vec<MountedColumn>,
    unmounts: usize,
}

impl MemorySurface {
    /// Surface that resolves no containers
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface that resolves `container`
    pub fn with_container(container: impl Into<Container>) -> Self {
        let mut surface = Self::default();
        surface.known.push(container.into());
        surface
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Input listeners are attached
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn labels(&self, column: usize) -> Option<&[String]> {
        self.columns
            .get(column)
            .and_then(|c| c.view.as_ref())
            .map(|v| v.labels.as_slice())
    }

    pub fn transforms(&self, column: usize) -> Option<&[ItemTransform]> {
        self.columns.get(column).map(|c| c.items.as_slice())
    }

    /// Label currently in the selection slot
    pub fn center_label(&self, column: usize) -> Option<&str> {
        let labels = self.labels(column)?;
        self.transforms(column)?
            .iter()
            .position(|t| t.is_center_slot)
            .and_then(|i| labels.get(i))
            .map(String::as_str)
    }

    pub fn unmount_count(&self) -> usize {
        self.unmounts
    }

    /// Render the rows around each column's center slot as text
    ///
    /// `rows` above and below the center are shown; the center row is
    /// bracketed.
    pub fn render_text(&self, rows: usize) -> String {
        let mut out = String::new();
        for (index, column) in self.columns.iter().enumerate() {
            let Some(view) = &column.view else {
                continue;
            };
            let center = column.items.iter().position(|t| t.is_center_slot);
            let _ = write!(out, "{:>6} |", view.kind.name());
            match center {
                Some(center) => {
                    let first = center.saturating_sub(rows);
                    let last = (center + rows).min(view.labels.len().saturating_sub(1));
                    for i in first..=last {
                        let label = &view.labels[i];
                        if i == center {
                            let _ = write!(out, " [{}]", label);
                        } else {
                            let _ = write!(out, " {}", label);
                        }
                    }
                }
                None => {
                    let _ = write!(out, " (column {} between slots)", index);
                }
            }
            out.push('\n');
        }
        out
    }
}

impl RenderSurface for MemorySurface {
    fn resolve(&mut self, container: &Container) -> Option<ContainerId> {
        self.known
            .iter()
            .position(|c| c == container)
            .map(|i| ContainerId(i as u64))
    }

    fn mount(&mut self, container: ContainerId, columns: &[ColumnView]) {
        self.mounted = Some(container);
        self.listening = true;
        self.columns = columns
            .iter()
            .map(|view| MountedColumn {
                view: Some(view.clone()),
                items: Vec::new(),
            })
            .collect();
    }

    fn relabel(&mut self, column: usize, labels: &[String]) {
        if let Some(view) = self.columns.get_mut(column).and_then(|c| c.view.as_mut()) {
            view.labels = labels.to_vec();
        }
    }

    fn present(&mut self, column: usize, items: &[ItemTransform]) {
        if let Some(mounted) = self.columns.get_mut(column) {
            mounted.items.clear();
            mounted.items.extend_from_slice(items);
        }
    }

    fn unmount(&mut self, container: ContainerId) {
        if self.mounted == Some(container) {
            self.mounted = None;
            self.listening = false;
            self.columns.clear();
            self.unmounts += 1;
        }
    }
}
