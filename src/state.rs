use std::io::BufRead;
use std::path::Path;

use crate::data::error::LoadError;
use crate::data::loader::{self, LoadOptions};
use crate::data::model::{Dataset, Split};
use crate::data::split;
use crate::selector::ColumnSelector;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Owns the current dataset and its most recent split.
///
/// Every load attempt starts from a clean slate: a failed load leaves the
/// session empty rather than holding on to the previous table.
#[derive(Debug, Default)]
pub struct Session {
    /// Loaded dataset (None until a load succeeds).
    dataset: Option<Dataset>,

    /// Result of the last `split` call, replaced on every call.
    split: Option<Split>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset, then load `source` and keep the result on success.
    pub fn load<R, S>(
        &mut self,
        source: R,
        selector: &mut S,
        options: &LoadOptions,
    ) -> Result<&Dataset, LoadError>
    where
        R: BufRead,
        S: ColumnSelector + ?Sized,
    {
        self.dataset = None;
        self.split = None;

        let dataset = loader::load(source, selector, options)?;
        Ok(&*self.dataset.insert(dataset))
    }

    /// Like [`Session::load`], reading from a file.
    pub fn load_file<S>(
        &mut self,
        path: &Path,
        selector: &mut S,
        options: &LoadOptions,
    ) -> Result<&Dataset, LoadError>
    where
        S: ColumnSelector + ?Sized,
    {
        self.dataset = None;
        self.split = None;

        let dataset = loader::load_file(path, selector, options)?;
        Ok(&*self.dataset.insert(dataset))
    }

    /// Store a new train/test split. Does nothing and returns `None` if
    /// nothing is loaded.
    pub fn split(&mut self, train_fraction: f64, seed: Option<u64>) -> Option<&mut Split> {
        let dataset = self.dataset.as_ref()?;
        let split = match seed {
            Some(seed) => split::split_seeded(dataset, train_fraction, seed),
            None => split::split(dataset, train_fraction),
        };
        Some(self.split.insert(split))
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn last_split(&self) -> Option<&Split> {
        self.split.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.as_ref().is_some_and(Dataset::is_loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::FixedColumn;

    const GOOD: &str = "a,b,y\n1,2,x\n3,4,y\n5,6,x\n7,8,y\n9,10,x\n";

    fn load(session: &mut Session, text: &str) -> Result<usize, LoadError> {
        session
            .load(text.as_bytes(), &mut FixedColumn(2), &LoadOptions::default())
            .map(Dataset::len)
    }

    #[test]
    fn failed_reload_clears_previous_state() {
        let mut session = Session::new();
        assert_eq!(load(&mut session, GOOD).unwrap(), 5);
        assert!(session.split(0.8, Some(1)).is_some());
        assert!(session.is_loaded());

        assert!(load(&mut session, "a,b,y\n").is_err());
        assert!(!session.is_loaded());
        assert!(session.dataset().is_none());
        assert!(session.last_split().is_none());
    }

    #[test]
    fn split_without_data_is_a_no_op() {
        let mut session = Session::new();
        assert!(session.split(0.8, None).is_none());
        assert!(session.last_split().is_none());
    }

    #[test]
    fn resplit_overwrites_previous_result() {
        let mut session = Session::new();
        load(&mut session, GOOD).unwrap();

        session.split(0.8, Some(3));
        assert_eq!(session.last_split().unwrap().train.len(), 4);

        session.split(0.4, Some(3));
        let split = session.last_split().unwrap();
        assert_eq!(split.train.len(), 2);
        assert_eq!(split.test.len(), 3);
    }
}
