//! Sessions: a workflow forest bound to its store.
//!
//! A [`Session`] loads the forest once, applies edits through the forest's
//! entry points, and writes the whole forest back after each successful
//! edit. Marker operations read and rewrite text through a
//! [`MarkerHost`] and never change the forest.

use tracing::{debug, info};

use flowmark_chain::{default_forest, ChainError, ChainForest, DeleteOutcome, StateNode, StatePatch};
use flowmark_refs::{state_query, MarkerHost, MarkerRef};
use flowmark_store::ForestStore;
use flowmark_types::{ClockIdGenerator, Color, IdSource, StateId};

use crate::config::SessionConfig;
use crate::error::{SdkError, SdkResult};
use crate::resolution::resolve_marker;
use crate::transition::{advance, toggle_checkbox};

/// One workflow forest bound to the store it is persisted in.
///
/// Mutations go through the forest's entry points and are persisted as soon
/// as they succeed. A failed mutation leaves both the forest and the store
/// untouched.
pub struct Session<S: ForestStore, I: IdSource = ClockIdGenerator> {
    store: S,
    ids: I,
    config: SessionConfig,
    forest: ChainForest,
}

impl<S: ForestStore> Session<S> {
    /// Open a session with wall-clock id generation.
    pub fn open(store: S, config: SessionConfig) -> SdkResult<Self> {
        Self::open_with_ids(store, config, ClockIdGenerator::new())
    }
}

impl<S: ForestStore, I: IdSource> Session<S, I> {
    /// Open a session drawing fresh ids from `ids`, and load the forest.
    pub fn open_with_ids(store: S, config: SessionConfig, ids: I) -> SdkResult<Self> {
        let mut session = Self {
            store,
            ids,
            config,
            forest: ChainForest::new(),
        };
        session.load()?;
        Ok(session)
    }

    /// Replace the in-memory forest with the stored one.
    ///
    /// An empty store is seeded with the default workflows when the config
    /// asks for it.
    pub fn load(&mut self) -> SdkResult<()> {
        match self.store.load_forest()? {
            Some(forest) => {
                info!(chains = forest.len(), "loaded workflows");
                self.forest = forest;
            }
            None if self.config.seed_defaults => {
                info!("no stored workflows, seeding defaults");
                self.forest = default_forest();
                self.persist()?;
            }
            None => {
                info!("no stored workflows");
                self.forest = ChainForest::new();
            }
        }
        Ok(())
    }

    /// Write the current forest to the store.
    pub fn persist(&self) -> SdkResult<()> {
        self.store.save_forest(&self.forest)?;
        info!(chains = self.forest.len(), "persisted workflows");
        Ok(())
    }

    /// The current forest.
    pub fn forest(&self) -> &ChainForest {
        &self.forest
    }

    /// The config this session was opened with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ---- Mutations ----

    /// Start a new chain. Returns the head id.
    pub fn create_chain(&mut self, label: &str, color: Option<Color>) -> SdkResult<StateId> {
        let color = color.unwrap_or_else(Color::random_pretty);
        let head = self.forest.create_chain(&mut self.ids, label, color)?.head_id();
        self.persist()?;
        Ok(head)
    }

    /// Append a state to a chain. Returns the new state's id.
    pub fn append_state(
        &mut self,
        head: StateId,
        label: &str,
        color: Option<Color>,
    ) -> SdkResult<StateId> {
        let color = color.unwrap_or_else(Color::random_pretty);
        let state = self
            .forest
            .append_state(&mut self.ids, head, label, color)?
            .tail()
            .id;
        self.persist()?;
        Ok(state)
    }

    /// Make a chain loop back to its head, or stop looping.
    pub fn set_circular(&mut self, head: StateId, circular: bool) -> SdkResult<()> {
        self.forest.set_circular(head, circular)?;
        self.persist()
    }

    /// Enable, restyle, or disable a chain's checkbox branch.
    ///
    /// Enabling a chain that never had a branch needs a label; the color
    /// defaults to a palette color. Enabling with neither label nor color
    /// re-uses the current branch. Returns the branch id while enabled.
    pub fn set_checkbox_branch(
        &mut self,
        head: StateId,
        enabled: bool,
        label: Option<&str>,
        color: Option<Color>,
    ) -> SdkResult<Option<StateId>> {
        let draft = if enabled {
            self.checkbox_draft(head, label, color)?
        } else {
            None
        };
        let branch = self
            .forest
            .set_checkbox_branch(&mut self.ids, head, enabled, draft)?
            .checkbox_branch()
            .map(|branch| branch.id);
        self.persist()?;
        Ok(branch)
    }

    fn checkbox_draft(
        &self,
        head: StateId,
        label: Option<&str>,
        color: Option<Color>,
    ) -> SdkResult<Option<StateNode>> {
        let chain = self
            .forest
            .chain(head)
            .ok_or(ChainError::ChainNotFound(head))?;
        let existing = chain.head().checkbox_branch.as_deref();
        if existing.is_some() && label.is_none() && color.is_none() {
            return Ok(None);
        }
        let label = label
            .map(str::to_string)
            .or_else(|| existing.map(|branch| branch.label.clone()))
            .ok_or_else(|| SdkError::InvalidOperation("a new checkbox branch needs a label".into()))?;
        let color = color
            .or_else(|| existing.map(|branch| branch.color.clone()))
            .unwrap_or_else(Color::random_pretty);
        let id = existing.map_or(StateId::UNSET, |branch| branch.id);
        Ok(Some(StateNode::checkbox(id, label, color)))
    }

    /// Rename or recolor one state of a chain.
    pub fn update_state(&mut self, head: StateId, patch: &StatePatch) -> SdkResult<()> {
        self.forest.update_state(head, patch)?;
        self.persist()
    }

    /// Delete a state; naming the head deletes its chain.
    pub fn delete_state(&mut self, head: StateId, state: StateId) -> SdkResult<DeleteOutcome> {
        let outcome = self.forest.delete_state(head, state)?;
        self.persist()?;
        Ok(outcome)
    }

    /// Delete a whole chain. Returns `false` (and writes nothing) if it was
    /// already gone.
    pub fn delete_chain(&mut self, head: StateId) -> SdkResult<bool> {
        let removed = self.forest.delete_chain(head);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    // ---- Markers ----

    /// The sentinel presented for markers that resolve to nothing.
    pub fn unknown_state(&self) -> StateNode {
        StateNode::new(
            StateId::UNKNOWN,
            self.config.unknown_label.clone(),
            self.config.unknown_color.clone(),
        )
    }

    /// Resolve a marker, falling back to the unknown-state sentinel.
    pub fn resolve_marker(&self, marker: &MarkerRef) -> StateNode {
        resolve_marker(&self.forest, marker)
            .state()
            .cloned()
            .unwrap_or_else(|| self.unknown_state())
    }

    /// One marker per chain head, in forest order.
    pub fn quick_insert_markers(&self) -> Vec<MarkerRef> {
        self.forest
            .heads()
            .map(|head| MarkerRef::for_state(head.id, head.label.clone()))
            .collect()
    }

    /// A query block finding text marked with any of `labels`.
    ///
    /// An empty selection selects every distinct label. Labels that no state
    /// carries are rejected.
    pub fn state_query(&self, labels: &[String], title: Option<&str>) -> SdkResult<String> {
        let known = self.forest.distinct_labels();
        if let Some(missing) = labels.iter().find(|l| !known.contains(&l.as_str())) {
            let reason = format!("no state is labeled '{missing}'");
            return Err(SdkError::InvalidOperation(reason));
        }
        let query = if labels.is_empty() {
            state_query(known.as_slice(), title)
        } else {
            state_query(labels, title)
        };
        query.ok_or_else(|| SdkError::InvalidOperation("no labels to query".into()))
    }

    /// Put a marker for the head of chain `head` at `at`.
    pub fn insert_marker<H: MarkerHost>(
        &self,
        host: &H,
        at: &H::Location,
        head: StateId,
    ) -> SdkResult<MarkerRef> {
        let chain = self
            .forest
            .chain(head)
            .ok_or(ChainError::ChainNotFound(head))?;
        let marker = MarkerRef::for_state(chain.head_id(), chain.head().label.clone());
        host.write_marker(at, &marker)?;
        debug!(location = %at, marker = %marker, "inserted marker");
        Ok(marker)
    }

    /// Move the marker at `at` to its successor state.
    ///
    /// Returns the written marker, or `None` when the state has nowhere to go.
    pub fn advance_marker<H: MarkerHost>(
        &self,
        host: &H,
        at: &H::Location,
    ) -> SdkResult<Option<MarkerRef>> {
        self.transition_marker(host, at, advance)
    }

    /// Check or uncheck the marker at `at`.
    ///
    /// Returns the written marker, or `None` when the state has no checkbox
    /// counterpart.
    pub fn toggle_marker_checkbox<H: MarkerHost>(
        &self,
        host: &H,
        at: &H::Location,
    ) -> SdkResult<Option<MarkerRef>> {
        self.transition_marker(host, at, toggle_checkbox)
    }

    fn transition_marker<H: MarkerHost>(
        &self,
        host: &H,
        at: &H::Location,
        step: for<'f> fn(&'f ChainForest, StateId) -> Option<&'f StateNode>,
    ) -> SdkResult<Option<MarkerRef>> {
        let marker = host
            .read_marker(at)?
            .ok_or_else(|| SdkError::NoMarker(at.to_string()))?;
        let Some(current) = resolve_marker(&self.forest, &marker).state() else {
            debug!(location = %at, marker = %marker, "marker does not resolve");
            return Ok(None);
        };
        let Some(target) = step(&self.forest, current.id) else {
            return Ok(None);
        };
        let next = MarkerRef::for_state(target.id, target.label.clone());
        host.write_marker(at, &next)?;
        debug!(location = %at, from = %current.id, to = %target.id, "moved marker");
        Ok(Some(next))
    }
}
