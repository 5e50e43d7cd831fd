//! Ordered measure-to-value mapping returned by aggregation views.

use super::Measure;

/// Ordered mapping from [`Measure`] to its value.
///
/// Iteration follows insertion order, which for aggregation views is the
/// order the view lists its measures in. Inserting a measure that is already
/// present replaces its value in place.
///
/// # Examples
/// ```
/// use bsm_models::greeks::{Greeks, Measure};
///
/// let greeks: Greeks = [(Measure::Delta, 0.55), (Measure::Gamma, 0.02)]
///     .into_iter()
///     .collect();
///
/// assert_eq!(greeks.get(Measure::Delta), Some(0.55));
/// assert_eq!(greeks.get_by_name("gamma"), Some(0.02));
/// assert_eq!(greeks.keys().collect::<Vec<_>>(), vec![Measure::Delta, Measure::Gamma]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Greeks {
    entries: Vec<(Measure, f64)>,
}

impl Greeks {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value of `measure`.
    pub fn insert(&mut self, measure: Measure, value: f64) {
        match self.entries.iter_mut().find(|(m, _)| *m == measure) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((measure, value)),
        }
    }

    /// Value of `measure`, if present.
    pub fn get(&self, measure: Measure) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == measure)
            .map(|(_, v)| *v)
    }

    /// Value stored under the snake_case key `name`, if present.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| m.as_str() == name)
            .map(|(_, v)| *v)
    }

    /// Returns true if `measure` is present.
    pub fn contains(&self, measure: Measure) -> bool {
        self.get(measure).is_some()
    }

    /// Measures in order.
    pub fn keys(&self) -> impl Iterator<Item = Measure> + '_ {
        self.entries.iter().map(|(m, _)| *m)
    }

    /// `(measure, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (Measure, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of measures.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no measure is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Measure, f64)> for Greeks {
    fn from_iter<I: IntoIterator<Item = (Measure, f64)>>(iter: I) -> Self {
        let mut greeks = Greeks::new();
        for (measure, value) in iter {
            greeks.insert(measure, value);
        }
        greeks
    }
}

impl IntoIterator for Greeks {
    type Item = (Measure, f64);
    type IntoIter = std::vec::IntoIter<(Measure, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Greeks {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (measure, value) in &self.entries {
            map.serialize_entry(measure.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut greeks = Greeks::new();
        greeks.insert(Measure::Vega, 1.0);
        greeks.insert(Measure::Delta, 2.0);
        greeks.insert(Measure::Rho, 3.0);
        assert_eq!(
            greeks.keys().collect::<Vec<_>>(),
            vec![Measure::Vega, Measure::Delta, Measure::Rho]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut greeks = Greeks::new();
        greeks.insert(Measure::Vega, 1.0);
        greeks.insert(Measure::Delta, 2.0);
        greeks.insert(Measure::Vega, 5.0);
        assert_eq!(greeks.len(), 2);
        assert_eq!(greeks.iter().next(), Some((Measure::Vega, 5.0)));
    }

    #[test]
    fn test_lookup_missing() {
        let greeks: Greeks = [(Measure::Delta, 0.5)].into_iter().collect();
        assert_eq!(greeks.get(Measure::Gamma), None);
        assert_eq!(greeks.get_by_name("naive_itm"), None);
        assert!(!greeks.contains(Measure::Gamma));
        assert!(greeks.contains(Measure::Delta));
    }

    #[test]
    fn test_empty() {
        let greeks = Greeks::new();
        assert!(greeks.is_empty());
        assert_eq!(greeks.len(), 0);
    }

    #[test]
    fn test_into_iter() {
        let greeks: Greeks = [(Measure::NaiveItm, 0.7), (Measure::DualDelta, -0.7)]
            .into_iter()
            .collect();
        let pairs: Vec<_> = greeks.into_iter().collect();
        assert_eq!(
            pairs,
            vec![(Measure::NaiveItm, 0.7), (Measure::DualDelta, -0.7)]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialises_as_ordered_object() {
        let greeks: Greeks = [(Measure::NaiveItm, 0.5), (Measure::DualDelta, -0.25)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&greeks).unwrap();
        assert_eq!(json, r#"{"naive_itm":0.5,"dual_delta":-0.25}"#);
    }
}
