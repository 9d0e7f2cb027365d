//! Inverse document frequency table.

use ahash::{AHashMap, AHashSet};

/// Document frequencies of feature keys over a training corpus.
///
/// `idf(k) = ln((N + 1) / (df(k) + 1)) + 1`, the smoothed form, which is
/// at least 1 for every key, including keys never seen during fitting.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    document_frequency: AHashMap<String, usize>,
    n_documents: usize,
}

impl IdfTable {
    /// Count, for every key, how many documents contain it.
    pub fn fit<'a, D, K>(documents: D) -> Self
    where
        D: IntoIterator<Item = K>,
        K: IntoIterator<Item = &'a str>,
    {
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut n_documents = 0;

        for document in documents {
            n_documents += 1;
            let unique: AHashSet<&str> = document.into_iter().collect();
            for key in unique {
                *document_frequency.entry(key.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            document_frequency,
            n_documents,
        }
    }

    /// Smoothed inverse document frequency of `key`.
    pub fn idf(&self, key: &str) -> f64 {
        let df = self.document_frequency.get(key).copied().unwrap_or(0);
        ((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
    }

    /// Number of documents the table was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Number of distinct keys seen while fitting.
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf_values() {
        let documents = vec![vec!["good", "good", "film"], vec!["bad", "film"]];
        let table = IdfTable::fit(documents.iter().map(|d| d.iter().copied()));

        assert_eq!(table.n_documents(), 2);
        assert_eq!(table.vocabulary_size(), 3);

        // Present in every document: ln(3/3) + 1
        assert!((table.idf("film") - 1.0).abs() < 1e-12);
        // Repeats inside one document count once: ln(3/2) + 1
        assert!((table.idf("good") - (1.5f64.ln() + 1.0)).abs() < 1e-12);
        // Unseen: ln(3/1) + 1
        assert!((table.idf("unseen") - (3.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rarer_keys_weigh_more() {
        let documents = vec![vec!["a", "b"], vec!["a"], vec!["a"]];
        let table = IdfTable::fit(documents.iter().map(|d| d.iter().copied()));

        assert!(table.idf("b") > table.idf("a"));
        assert!(table.idf("a") >= 1.0);
    }

    #[test]
    fn test_empty_corpus() {
        let table = IdfTable::fit(Vec::<Vec<&str>>::new());
        assert_eq!(table.n_documents(), 0);
        assert!((table.idf("anything") - 1.0).abs() < 1e-12);
    }
}
