/// The selected subject and its server-provided file listing.
///
/// Exactly one subject is selected at any time. The listing shown in the
/// UI is an ephemeral copy of the server's file set for that subject; it
/// is thrown away and refetched whenever the selection changes or an
/// upload completes for the active subject.

/// What the file panel is currently showing for the selected subject.
///
/// `Loaded(vec![])` is a real state ("no files uploaded yet"), distinct
/// from `Loading` — the view must never be ambiguous between the two.
#[derive(Debug, Clone, PartialEq)]
pub enum FileListing {
    /// A fetch for the selected subject is in flight (or failed silently).
    Loading,
    /// The server's file set, in server order.
    Loaded(Vec<String>),
}

/// Single owner of the "currently selected subject" cell.
///
/// Async completions must re-read the live selection through this struct
/// at the moment they apply, never a snapshot captured at request time.
/// That is what makes rapid subject switches safe: a response that raced
/// in for a subject the user has already left is simply discarded.
#[derive(Debug)]
pub struct Session {
    selected: String,
    listing: FileListing,
}

impl Session {
    pub fn new(default_subject: &str) -> Self {
        Self {
            selected: default_subject.to_owned(),
            listing: FileListing::Loading,
        }
    }

    /// The currently selected subject.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn listing(&self) -> &FileListing {
        &self.listing
    }

    /// Switch the selection and drop the old listing.
    ///
    /// Selecting the already-selected subject is a refresh: the listing
    /// still resets to `Loading` so the stale file set never lingers.
    pub fn select(&mut self, subject: &str) {
        self.selected = subject.to_owned();
        self.listing = FileListing::Loading;
    }

    /// Whether an async completion tagged with `subject` is still relevant.
    pub fn is_current(&self, subject: &str) -> bool {
        self.selected == subject
    }

    /// Apply a fetched listing, unless the selection has moved on.
    ///
    /// Returns `true` when the listing was applied. A `false` return means
    /// the payload was stale and the caller must not act on it (no preview
    /// tasks, no status updates).
    pub fn apply_listing(&mut self, subject: &str, files: Vec<String>) -> bool {
        if !self.is_current(subject) {
            return false;
        }

        self.listing = FileListing::Loaded(files);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_listing_is_discarded() {
        let mut session = Session::new("DS");

        // Switch A -> B before A's fetch resolves, then let the
        // responses arrive in reverse order.
        session.select("A");
        session.select("B");

        let applied = session.apply_listing("A", vec!["stale.txt".into()]);
        assert!(!applied);
        assert_eq!(session.listing(), &FileListing::Loading);

        let applied = session.apply_listing("B", vec!["fresh.txt".into()]);
        assert!(applied);
        assert_eq!(
            session.listing(),
            &FileListing::Loaded(vec!["fresh.txt".into()])
        );
    }

    #[test]
    fn last_selection_wins_regardless_of_arrival_order() {
        let mut session = Session::new("DS");

        session.select("A");
        session.select("B");
        session.select("C");

        // B's and A's responses race in after C was selected.
        assert!(!session.apply_listing("B", vec!["b.pdf".into()]));
        assert!(!session.apply_listing("A", vec!["a.pdf".into()]));
        assert!(session.apply_listing("C", vec!["c.pdf".into()]));

        assert_eq!(session.selected(), "C");
        assert_eq!(session.listing(), &FileListing::Loaded(vec!["c.pdf".into()]));
    }

    #[test]
    fn reselecting_same_subject_is_idempotent() {
        let mut session = Session::new("DS");
        let files = vec!["notes.pdf".into(), "lab.txt".into()];

        session.select("DS");
        assert!(session.apply_listing("DS", files.clone()));
        let first = session.listing().clone();

        session.select("DS");
        assert!(session.apply_listing("DS", files));
        assert_eq!(session.listing(), &first);
    }

    #[test]
    fn refresh_resets_to_loading() {
        let mut session = Session::new("DS");
        assert!(session.apply_listing("DS", vec!["old.txt".into()]));

        session.select("DS");
        assert_eq!(session.listing(), &FileListing::Loading);
    }

    #[test]
    fn empty_listing_is_distinct_from_loading() {
        let mut session = Session::new("DS");
        assert_eq!(session.listing(), &FileListing::Loading);

        assert!(session.apply_listing("DS", Vec::new()));
        assert_eq!(session.listing(), &FileListing::Loaded(Vec::new()));
        assert_ne!(session.listing(), &FileListing::Loading);
    }

    #[test]
    fn server_order_is_preserved() {
        let mut session = Session::new("DS");
        let files: Vec<String> = vec!["z.pdf".into(), "a.png".into(), "m.txt".into()];

        assert!(session.apply_listing("DS", files.clone()));
        assert_eq!(session.listing(), &FileListing::Loaded(files));
    }
}
