//! Form editor state machine shared by the CRUD views.
//!
//! `Closed -> Open(draft) -> Submitting(draft) -> Closed` on success, or back
//! to `Open(draft)` on failure so the user keeps what they typed.

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState<D> {
    Closed,
    Open(D),
    Submitting(D),
}

impl<D> Default for EditorState<D> {
    fn default() -> Self {
        EditorState::Closed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Editor<D> {
    state: EditorState<D>,
}

impl<D> Default for Editor<D> {
    fn default() -> Self {
        Self {
            state: EditorState::Closed,
        }
    }
}

impl<D: Clone> Editor<D> {
    pub fn new() -> Self {
        Self {
            state: EditorState::Closed,
        }
    }

    pub fn state(&self) -> &EditorState<D> {
        &self.state
    }

    /// Open the form with an initial draft. Ignored while submitting.
    pub fn open(&mut self, draft: D) {
        if !self.is_submitting() {
            self.state = EditorState::Open(draft);
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Open(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, EditorState::Submitting(_))
    }

    /// Current draft, in either the open or submitting state
    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            EditorState::Open(d) | EditorState::Submitting(d) => Some(d),
            EditorState::Closed => None,
        }
    }

    /// Editable draft; only while open
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match &mut self.state {
            EditorState::Open(d) => Some(d),
            _ => None,
        }
    }

    /// `Open -> Submitting`, handing back the draft to send
    pub fn begin_submit(&mut self) -> Option<D> {
        match std::mem::take(&mut self.state) {
            EditorState::Open(d) => {
                self.state = EditorState::Submitting(d.clone());
                Some(d)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// `Submitting -> Closed`; the draft is dropped
    pub fn succeed(&mut self) {
        if self.is_submitting() {
            self.state = EditorState::Closed;
        }
    }

    /// `Submitting -> Open(draft)`; the draft is retained
    pub fn fail(&mut self) {
        if let EditorState::Submitting(d) = std::mem::take(&mut self.state) {
            self.state = EditorState::Open(d);
        }
    }

    /// Close without submitting
    pub fn cancel(&mut self) {
        if !self.is_submitting() {
            self.state = EditorState::Closed;
        }
    }
}
