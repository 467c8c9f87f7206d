use std::str::FromStr;

use serde::Deserialize;

use crate::config::{ConnectionOptions, GroupingOptions, ViewOptions};
use crate::error::{Error, Result};
use crate::graph::DomainGraph;
use crate::graph::build::build_domain_groups;
use crate::graph::connections::{Connection, build_connections};
use crate::tree::NavigationTree;

/// Which of the two presentations is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Hierarchy,
    Cluster,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Hierarchy => "hierarchy",
            Self::Cluster => "cluster",
        }
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hierarchy" => Ok(Self::Hierarchy),
            "cluster" => Ok(Self::Cluster),
            _ => Err(Error::InvalidMode {
                name: name.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// Best-effort snapshot carried across a mode switch. Missing pieces are not
/// an error; the new presentation starts from its defaults instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SavedViewState {
    pub camera: Option<Camera>,
    pub selection: Option<String>,
}

/// Derived pipeline output handed to presentations alongside the raw tree.
/// The hierarchy presentation reads the tree directly; the cluster
/// presentation consumes the domain graph and connections.
#[derive(Clone, Debug, Default)]
pub struct DerivedData {
    pub graph: DomainGraph,
    pub connections: Vec<Connection>,
}

/// One of the two renderable layouts. Implemented by the external rendering
/// layer; the controller only coordinates lifecycle and state hand-off.
pub trait Presentation {
    fn mode(&self) -> ViewMode;
    fn set_data(&mut self, tree: &NavigationTree, derived: &DerivedData);
    fn camera(&self) -> Option<Camera> {
        None
    }
    fn selection(&self) -> Option<String> {
        None
    }
    fn restore(&mut self, saved: &SavedViewState) {
        let _ = saved;
    }
    /// Release rendering resources. A failure here is recovered by the
    /// controller clearing the container through the factory.
    fn teardown(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Builds presentations and owns the shared container they render into.
pub trait PresentationFactory {
    fn build(
        &mut self,
        mode: ViewMode,
        tree: &NavigationTree,
        derived: &DerivedData,
    ) -> Box<dyn Presentation>;

    /// Fallback teardown: wipe the container when a presentation's own
    /// teardown failed.
    fn clear_container(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    FadingOut,
    FadingIn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    TransitionStart { from: ViewMode, to: ViewMode },
    TransitionEnd { from: ViewMode, to: ViewMode },
    ModeChanged(ViewMode),
}

#[derive(Clone, Copy, Debug)]
enum ControllerState {
    Idle(ViewMode),
    Transitioning {
        from: ViewMode,
        to: ViewMode,
        phase: TransitionPhase,
    },
}

/// Owns exactly one active presentation at a time and coordinates switches
/// between them. Suspension points of an animated switch are explicit: the
/// renderer drives each fade with `complete_phase`, so the machine is
/// inspectable and testable without timers.
///
/// A `switch_mode` arriving while a transition is in flight is queued; the
/// latest queued request wins and is dispatched when the transition
/// completes.
pub struct ViewController<F: PresentationFactory> {
    factory: F,
    options: ViewOptions,
    grouping: GroupingOptions,
    connections: ConnectionOptions,
    tree: NavigationTree,
    now_ms: i64,
    state: ControllerState,
    active: Option<Box<dyn Presentation>>,
    saved: SavedViewState,
    overlay_visible: bool,
    pending: Option<(ViewMode, bool)>,
    events: Vec<ViewEvent>,
}

impl<F: PresentationFactory> ViewController<F> {
    /// Builds the initial presentation synchronously; no events are emitted
    /// for the first activation.
    pub fn new(
        mut factory: F,
        options: ViewOptions,
        grouping: GroupingOptions,
        connections: ConnectionOptions,
        tree: NavigationTree,
        now_ms: i64,
    ) -> Self {
        let derived = derive(&tree, &grouping, &connections, now_ms);
        let active = factory.build(options.default_mode, &tree, &derived);

        Self {
            factory,
            grouping,
            connections,
            tree,
            now_ms,
            state: ControllerState::Idle(options.default_mode),
            options,
            active: Some(active),
            saved: SavedViewState::default(),
            overlay_visible: false,
            pending: None,
            events: Vec::new(),
        }
    }

    /// The mode the controller is in or heading toward.
    pub fn mode(&self) -> ViewMode {
        match self.state {
            ControllerState::Idle(mode) => mode,
            ControllerState::Transitioning { to, .. } => to,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, ControllerState::Transitioning { .. })
    }

    pub fn transition_phase(&self) -> Option<TransitionPhase> {
        match self.state {
            ControllerState::Transitioning { phase, .. } => Some(phase),
            ControllerState::Idle(_) => None,
        }
    }

    /// Whether the transient overlay should currently be shown.
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Duration of each fade half of an animated switch.
    pub fn fade_duration_ms(&self) -> u64 {
        self.options.transition_duration_ms / 2
    }

    pub fn active_presentation(&mut self) -> Option<&mut Box<dyn Presentation>> {
        self.active.as_mut()
    }

    /// Drains buffered notifications in emission order.
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    /// Requests a presentation switch. Same-mode requests are no-ops; a
    /// request during an in-flight transition is queued (latest wins).
    pub fn switch_mode(&mut self, target: ViewMode, animate: bool) {
        match self.state {
            ControllerState::Idle(current) if current == target => {}
            ControllerState::Idle(current) => {
                if !animate || self.active.is_none() {
                    self.instant_switch(target);
                } else {
                    self.save_view_state();
                    self.events.push(ViewEvent::TransitionStart {
                        from: current,
                        to: target,
                    });
                    self.overlay_visible = true;
                    self.state = ControllerState::Transitioning {
                        from: current,
                        to: target,
                        phase: TransitionPhase::FadingOut,
                    };
                }
            }
            ControllerState::Transitioning { to, .. } => {
                // Latest request wins: re-requesting the in-flight target
                // supersedes anything queued earlier.
                if to == target {
                    self.pending = None;
                } else {
                    self.pending = Some((target, animate));
                }
            }
        }
    }

    /// `switch_mode` for mode names coming from the host. Unknown names fail
    /// without touching the controller state.
    pub fn switch_mode_named(&mut self, name: &str, animate: bool) -> Result<()> {
        let target = ViewMode::from_str(name)?;
        self.switch_mode(target, animate);
        Ok(())
    }

    /// Signals that the current fade finished. First call (fade-out done)
    /// swaps the presentations: the old one is torn down strictly before the
    /// new one is built. Second call (fade-in done) finishes the switch.
    pub fn complete_phase(&mut self) {
        let ControllerState::Transitioning { from, to, phase } = self.state else {
            return;
        };

        match phase {
            TransitionPhase::FadingOut => {
                self.teardown_active();
                let derived = derive(&self.tree, &self.grouping, &self.connections, self.now_ms);
                self.active = Some(self.factory.build(to, &self.tree, &derived));
                self.state = ControllerState::Transitioning {
                    from,
                    to,
                    phase: TransitionPhase::FadingIn,
                };
            }
            TransitionPhase::FadingIn => {
                self.overlay_visible = false;
                self.restore_view_state();
                self.state = ControllerState::Idle(to);
                self.events.push(ViewEvent::TransitionEnd { from, to });
                self.events.push(ViewEvent::ModeChanged(to));

                if let Some((target, animate)) = self.pending.take() {
                    self.switch_mode(target, animate);
                }
            }
        }
    }

    /// Re-runs the pipeline on a tree update and pushes the result into the
    /// active presentation without forcing a mode switch. During a transition
    /// the tree is retained; the pending build picks it up.
    pub fn update_data(&mut self, tree: NavigationTree, now_ms: i64) {
        self.tree = tree;
        self.now_ms = now_ms;

        if self.is_transitioning() {
            return;
        }

        let derived = derive(&self.tree, &self.grouping, &self.connections, self.now_ms);
        if let Some(active) = self.active.as_mut() {
            active.set_data(&self.tree, &derived);
        }
    }

    fn instant_switch(&mut self, target: ViewMode) {
        self.save_view_state();
        self.teardown_active();

        let derived = derive(&self.tree, &self.grouping, &self.connections, self.now_ms);
        self.active = Some(self.factory.build(target, &self.tree, &derived));
        self.restore_view_state();

        self.state = ControllerState::Idle(target);
        self.events.push(ViewEvent::ModeChanged(target));
    }

    fn save_view_state(&mut self) {
        let Some(active) = self.active.as_ref() else {
            self.saved = SavedViewState::default();
            return;
        };

        self.saved = SavedViewState {
            camera: if self.options.preserve_zoom {
                active.camera()
            } else {
                None
            },
            selection: if self.options.preserve_selection {
                active.selection()
            } else {
                None
            },
        };
    }

    fn restore_view_state(&mut self) {
        let saved = std::mem::take(&mut self.saved);
        if let Some(active) = self.active.as_mut() {
            active.restore(&saved);
        }
    }

    fn teardown_active(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };

        if let Err(error) = active.teardown() {
            log::warn!("presentation teardown failed ({error}); clearing container");
            self.factory.clear_container();
        }
    }
}

fn derive(
    tree: &NavigationTree,
    grouping: &GroupingOptions,
    connections: &ConnectionOptions,
    now_ms: i64,
) -> DerivedData {
    let graph = build_domain_groups(tree, grouping);
    let connections = build_connections(&graph, connections, now_ms);
    DerivedData { graph, connections }
}
