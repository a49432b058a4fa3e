use crate::Reflect;
use crate::ops::ScalarParseError;

// -----------------------------------------------------------------------------
// Map

/// A keyed collection.
///
/// Keys travel as strings on every wire format, so the interface exposes
/// them stringified; the key type itself must be a
/// [`Scalar`](crate::Scalar) so both directions have a lexical form.
pub trait Map: Reflect {
    fn entry_len(&self) -> usize;

    /// Iterates entries as `(stringified key, value)` in the collection's
    /// own order.
    fn entries(&self) -> Box<dyn Iterator<Item = (String, &dyn Reflect)> + '_>;

    /// Mutably borrows the value under a stringified key, if the key parses
    /// and is present.
    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Inserts a default value under a stringified key, parsing the key.
    ///
    /// Readers pre-seed the target with one entry per input label, then
    /// read the values back keyed.
    fn insert_default(&mut self, key: &str) -> Result<(), ScalarParseError>;

    /// The stringified keys, in the collection's own order.
    fn keys(&self) -> Vec<String> {
        self.entries().map(|(key, _)| key).collect()
    }
}
