use std::collections::{HashMap, HashSet};

/// Common English words excluded from the vocabulary before counting.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "its", "in", "on", "of", "to", "and", "or", "for", "with",
    "this", "that", "these", "those", "be", "are", "was", "were", "been", "being", "have",
    "has", "had", "do", "does", "did", "will", "would", "could", "should", "may", "might",
    "can", "shall", "not", "no", "nor", "but", "if", "at", "by", "from", "as", "into",
    "about", "over", "after", "before", "between", "through", "during", "up", "out", "so",
    "than", "then", "there", "here", "when", "where", "who", "whom", "which", "what", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "only", "own", "same", "very", "too", "just", "also", "you", "your", "i", "my", "we",
    "our", "they", "them", "their", "he", "him", "she", "her", "his", "hers",
];

/// Sparse unit-length vector: `(term_index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f32)>;

/// TF-IDF text vectorizer fitted over a document corpus.
///
/// Terms must appear in at least `min_df` documents to enter the vocabulary;
/// everything rarer is treated as noise and dropped, which also keeps the
/// vector space stable across reloads of the same corpus. Vocabulary indices
/// are assigned in first-seen corpus order, so fitting identical input twice
/// yields an identical space.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term → dimension index
    vocabulary: HashMap<String, usize>,
    /// IDF weight per dimension
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit a vectorizer over the corpus.
    ///
    /// A corpus where no term reaches `min_df` produces an empty vocabulary;
    /// transforms then yield empty vectors and every similarity scores 0.0.
    /// That is a degraded space, not an error.
    pub fn fit<S: AsRef<str>>(documents: &[S], min_df: usize) -> Self {
        let n = documents.len() as f32;
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Assign indices in first-seen order so refits of the same corpus
        // produce the same space.
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut idf: Vec<f32> = Vec::new();
        for tokens in &tokenized {
            for term in tokens {
                if vocabulary.contains_key(term.as_str()) {
                    continue;
                }
                let df = doc_freq[term.as_str()];
                if df >= min_df {
                    vocabulary.insert(term.clone(), idf.len());
                    idf.push((n / df as f32).ln() + 1.0);
                }
            }
        }

        Self { vocabulary, idf }
    }

    /// Project a text into the fitted space as a sparse unit vector.
    /// Terms outside the vocabulary contribute nothing.
    pub fn transform(&self, text: &str) -> SparseVector {
        if self.vocabulary.is_empty() {
            return Vec::new();
        }

        let mut tf: HashMap<usize, f32> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(token.as_str()) {
                *tf.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = tf
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        vector.sort_by_key(|&(idx, _)| idx);

        normalize(&mut vector);
        vector
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Cosine similarity of two sparse unit vectors: a merge-walk dot product.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let mut dot = 0.0f32;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

/// Tokenize text: lowercase, split on non-alphanumeric, drop one-character
/// tokens and stop words.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 1)
        .filter(|w| !STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}

/// Scale a sparse vector to unit length (in-place). Zero vectors stay zero.
fn normalize(v: &mut SparseVector) {
    let norm: f32 = v.iter().map(|(_, x)| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, x) in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "action thriller heist crew city",
            "action thriller spy city chase",
            "romance drama city artist",
            "action spy gadget chase",
            "drama courtroom lawyer city",
        ]
    }

    #[test]
    fn test_min_df_prunes_rare_terms() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), 2);

        // "city" appears in 4 documents, "courtroom" in 1.
        let city = vectorizer.transform("city");
        let courtroom = vectorizer.transform("courtroom");

        assert_eq!(city.len(), 1);
        assert!(courtroom.is_empty());
    }

    #[test]
    fn test_cutoff_above_corpus_size_gives_empty_vocabulary() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), 10);
        assert_eq!(vectorizer.vocabulary_len(), 0);
        assert!(vectorizer.transform("action city").is_empty());
    }

    #[test]
    fn test_transform_is_unit_length() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), 1);
        let v = vectorizer.transform("action thriller heist");
        let norm: f32 = v.iter().map(|(_, x)| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn test_stop_words_and_short_tokens_are_dropped() {
        let vectorizer = TfidfVectorizer::fit(&["the a an and of to x y"], 1);
        assert_eq!(vectorizer.vocabulary_len(), 0);
    }

    #[test]
    fn test_cosine_prefers_similar_text() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), 1);
        let query = vectorizer.transform("action thriller heist crew");

        let close = vectorizer.transform("action thriller spy city chase");
        let far = vectorizer.transform("romance drama city artist");

        assert!(cosine(&query, &close) > cosine(&query, &far));
    }

    #[test]
    fn test_identical_text_scores_one() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), 1);
        let v = vectorizer.transform("action thriller heist crew city");
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_refit_is_deterministic() {
        let a = TfidfVectorizer::fit(&corpus(), 2);
        let b = TfidfVectorizer::fit(&corpus(), 2);

        let text = "action spy chase city";
        assert_eq!(a.transform(text), b.transform(text));
    }
}
