//! Text profiles for content-based scoring.
//!
//! Each document is lowercased, split into word tokens of at least two characters and
//! stripped of English stop words. Terms are weighted with smoothed TF-IDF
//! (`idf = ln((1 + n) / (1 + df)) + 1`) and every document vector is L2-normalised.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::ScoringError;

/// Common English function words excluded from text profiles
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be",
    "became", "because", "become", "becomes", "becoming", "been", "before",
    "beforehand", "behind", "being", "below", "beside", "besides", "between", "beyond",
    "bill", "both", "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done", "down", "due",
    "during", "each", "eg", "eight", "either", "eleven", "else", "elsewhere", "empty",
    "enough", "etc", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for",
    "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself",
    "his", "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter",
    "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much",
    "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless",
    "next", "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now",
    "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten",
    "than", "that", "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they",
    "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards",
    "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us", "very",
    "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Splits text into lowercase word tokens, dropping one-character tokens and stop words
pub fn tokenize(text: &str, stop_words: &HashSet<&str>) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !stop_words.contains(token))
        .map(str::to_string)
        .collect()
}

/// TF-IDF vectors for a fixed document collection
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Fits the vocabulary on `documents` and vectorizes them
    ///
    /// The vocabulary keeps the `max_features` terms with the highest total count
    /// across the collection (ties go to the alphabetically smaller term) and is
    /// ordered alphabetically.
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        max_features: usize,
    ) -> Result<Self, ScoringError> {
        let stop_words: HashSet<&str> = ENGLISH_STOP_WORDS.iter().copied().collect();
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref(), &stop_words))
            .collect();

        let mut corpus_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            for token in tokens {
                *corpus_counts.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        if corpus_counts.is_empty() {
            return Err(ScoringError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        // BTreeMap order is alphabetical, so a stable sort keeps alphabetical tie order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();

        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let n_docs = tokenized.len() as f64;
        let mut document_frequency = vec![0usize; vocabulary.len()];
        let mut term_counts: Vec<Vec<f64>> = Vec::with_capacity(tokenized.len());

        for tokens in &tokenized {
            let mut counts = vec![0.0; vocabulary.len()];
            for token in tokens {
                if let Some(&i) = index.get(token.as_str()) {
                    counts[i] += 1.0;
                }
            }
            for (i, count) in counts.iter().enumerate() {
                if *count > 0.0 {
                    document_frequency[i] += 1;
                }
            }
            term_counts.push(counts);
        }

        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = term_counts
            .into_iter()
            .map(|counts| {
                let mut row: Vec<f64> = counts.iter().zip(&idf).map(|(tf, w)| tf * w).collect();
                let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|x| *x /= norm);
                }
                row
            })
            .collect();

        Ok(Self { vocabulary, rows })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Elementwise mean of the given rows, `None` when `indices` is empty
    pub fn mean_of(&self, indices: &[usize]) -> Option<Vec<f64>> {
        if indices.is_empty() {
            return None;
        }

        let mut mean = vec![0.0; self.vocabulary.len()];
        for &i in indices {
            for (acc, value) in mean.iter_mut().zip(&self.rows[i]) {
                *acc += value;
            }
        }
        let count = indices.len() as f64;
        mean.iter_mut().for_each(|x| *x /= count);
        Some(mean)
    }
}
