//! The retrieval-augmented orchestrator
//!
//! Sequences the collaborators for one question: embed the question,
//! query the document's index for the nearest chunks, join them into a
//! context string, and either hand (question, context) to the answer
//! synthesizer or fall back to quoting the context directly. Every
//! answered question appends a (user, assistant) turn pair to the
//! session's conversation log for the document.

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::loader::LoadedDocument;
use crate::session::SessionContext;
use scrivener_domain::traits::{AnswerSynthesizer, TextEmbedder, TextExtractor};
use scrivener_domain::{Document, FileKind, LoadState};
use scrivener_index::{IndexError, VectorIndex};
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info, warn};

/// Fixed prefix of the fallback answer
pub const FALLBACK_PREFIX: &str =
    "No answer model is available. The most relevant passages were:\n";

/// Marker appended to the fallback answer's quoted context
pub const FALLBACK_TRUNCATION_MARKER: &str = " [...]";

/// Build the deterministic fallback answer from retrieved context
///
/// A pure function of its inputs: a fixed prefix, at most `limit`
/// characters of the context, and the truncation marker.
pub fn fallback_answer(context: &str, limit: usize) -> String {
    let mut answer = String::from(FALLBACK_PREFIX);
    answer.extend(context.chars().take(limit));
    answer.push_str(FALLBACK_TRUNCATION_MARKER);
    answer
}

/// The document question-answering agent
///
/// Owns the collaborators and drives both halves of the workflow: the
/// load pipeline (extract -> chunk -> embed -> index) and per-question
/// retrieval-augmented answering. The synthesizer is optional; without
/// one, answers degrade to the deterministic raw-context fallback.
pub struct Agent<X, E, S>
where
    X: TextExtractor,
    E: TextEmbedder,
    S: AnswerSynthesizer,
{
    extractor: X,
    embedder: E,
    synthesizer: Option<S>,
    config: AgentConfig,
}

impl<X, E, S> Agent<X, E, S>
where
    X: TextExtractor,
    E: TextEmbedder,
    S: AnswerSynthesizer,
    X::Error: Display,
    E::Error: Display,
    S::Error: Display,
{
    /// Create a new agent
    ///
    /// # Errors
    ///
    /// Fails with [`AgentError::Config`] if the configuration does not
    /// validate.
    pub fn new(
        extractor: X,
        embedder: E,
        synthesizer: Option<S>,
        config: AgentConfig,
    ) -> Result<Self, AgentError> {
        config.validate().map_err(AgentError::Config)?;

        Ok(Self {
            extractor,
            embedder,
            synthesizer,
            config,
        })
    }

    /// The agent's configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Whether an answer synthesizer is configured
    pub fn has_synthesizer(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Load a document from a file, running the full pipeline to `Ready`
    ///
    /// An extraction failure aborts the load before a document handle
    /// exists; the caller's previously loaded document (if any) is
    /// untouched.
    pub fn load(&self, path: &Path) -> Result<LoadedDocument, AgentError> {
        let kind = FileKind::from_path(path).ok_or_else(|| {
            AgentError::Extraction(format!("Unsupported file type: {}", path.display()))
        })?;

        let name = document_name(path);
        info!("Loading '{}' as {}", name, kind);

        let text = self
            .extractor
            .extract(path, kind)
            .map_err(|e| AgentError::Extraction(e.to_string()))?;

        self.load_text(name, text)
    }

    /// Load a document from already-extracted text
    pub fn load_text(
        &self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<LoadedDocument, AgentError> {
        let document = Document::new(name, text, self.config.chunk_size);
        debug!(
            "Chunked '{}' into {} chunks of {} chars",
            document.name,
            document.chunk_count(),
            self.config.chunk_size
        );

        let mut loaded = LoadedDocument::chunked(document);
        self.index_document(&mut loaded)?;
        Ok(loaded)
    }

    /// Re-load a document from a file, skipping the rebuild when nothing
    /// changed
    ///
    /// Returns `Ok(None)` when `current` already covers the file's name
    /// and content and is `Ready`; otherwise runs the full pipeline and
    /// returns the fresh handle. Index builds are keyed by document
    /// identity and content hash, never re-run implicitly.
    pub fn reload(
        &self,
        path: &Path,
        current: Option<&LoadedDocument>,
    ) -> Result<Option<LoadedDocument>, AgentError> {
        let kind = FileKind::from_path(path).ok_or_else(|| {
            AgentError::Extraction(format!("Unsupported file type: {}", path.display()))
        })?;

        let name = document_name(path);
        let text = self
            .extractor
            .extract(path, kind)
            .map_err(|e| AgentError::Extraction(e.to_string()))?;

        if let Some(existing) = current {
            if existing.state() == LoadState::Ready && existing.is_unchanged(&name, &text) {
                debug!("'{}' unchanged, keeping existing index", name);
                return Ok(None);
            }
        }

        self.load_text(name, text).map(Some)
    }

    /// Embed a chunked document's chunks and build its index
    ///
    /// Advances the handle `Chunked -> Indexed -> Ready`; on any failure
    /// the handle lands in `Failed` and the error is returned.
    pub fn index_document(&self, loaded: &mut LoadedDocument) -> Result<(), AgentError> {
        let embedded: Result<Vec<Vec<f32>>, String> = loaded
            .document
            .chunks
            .iter()
            .map(|chunk| self.embedder.embed(&chunk.text).map_err(|e| e.to_string()))
            .collect();

        let vectors = match embedded {
            Ok(vectors) => vectors,
            Err(e) => {
                loaded.state = LoadState::Failed;
                return Err(AgentError::Embedding(e));
            }
        };

        let index = match VectorIndex::build(vectors) {
            Ok(index) => index,
            Err(e) => {
                loaded.state = LoadState::Failed;
                return Err(e.into());
            }
        };
        loaded.state = LoadState::Indexed;

        // The index must agree with the embedder before questions flow
        if index.dimension() != self.embedder.dimension() {
            loaded.state = LoadState::Failed;
            return Err(AgentError::Index(IndexError::DimensionMismatch {
                expected: self.embedder.dimension(),
                actual: index.dimension(),
            }));
        }

        info!(
            "Indexed '{}': {} vectors of dimension {}",
            loaded.document.name,
            index.len(),
            index.dimension()
        );
        loaded.index = Some(index);
        loaded.state = LoadState::Ready;
        Ok(())
    }

    /// Answer a question against a loaded document
    ///
    /// Retrieves the top-k nearest chunks, joins their texts
    /// nearest-first with newlines into the context, and synthesizes an
    /// answer - or returns the deterministic fallback when no synthesizer
    /// is configured or the synthesis call fails. On success the
    /// (user, assistant) turn pair is appended to the document's
    /// conversation log.
    ///
    /// # Errors
    ///
    /// - [`AgentError::NotReady`] unless the document's state is `Ready`
    /// - [`AgentError::Retrieval`] if the document is not the session's
    ///   active document, or the index disagrees with the embedder
    /// - [`AgentError::Embedding`] if the question cannot be embedded
    pub fn answer(
        &self,
        loaded: &LoadedDocument,
        session: &mut SessionContext,
        question: &str,
    ) -> Result<String, AgentError> {
        if !loaded.state().can_answer() {
            return Err(AgentError::NotReady(loaded.state()));
        }

        if session.current() != Some(loaded.document.id) {
            return Err(AgentError::Retrieval(format!(
                "Document '{}' is not the session's active document",
                loaded.document.name
            )));
        }

        let index = loaded
            .index
            .as_ref()
            .ok_or(AgentError::NotReady(loaded.state()))?;

        let query_vector = self
            .embedder
            .embed(question)
            .map_err(|e| AgentError::Embedding(e.to_string()))?;

        let neighbors = index
            .query(&query_vector, self.config.top_k)
            .map_err(|e| AgentError::Retrieval(e.to_string()))?;

        let mut nearest = Vec::with_capacity(neighbors.len());
        for neighbor in &neighbors {
            let chunk = loaded.document.chunks.get(neighbor.index).ok_or_else(|| {
                AgentError::Retrieval(format!(
                    "Index refers to chunk {} beyond document '{}'",
                    neighbor.index, loaded.document.name
                ))
            })?;
            nearest.push(chunk.text.as_str());
        }
        let context = nearest.join("\n");
        debug!(
            "Retrieved {} chunks ({} chars of context) for question",
            neighbors.len(),
            context.len()
        );

        let answer = match &self.synthesizer {
            Some(synthesizer) => match synthesizer.synthesize(question, &context) {
                Ok(answer) => answer,
                Err(e) => {
                    warn!("Synthesis failed, falling back to raw context: {}", e);
                    fallback_answer(&context, self.config.fallback_context_chars)
                }
            },
            None => fallback_answer(&context, self.config.fallback_context_chars),
        };

        let log = session.log_mut(loaded.document.id);
        log.push_user(question);
        log.push_assistant(answer.clone());

        Ok(answer)
    }
}

/// Display name for a document loaded from a path
fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrivener_domain::Role;
    use scrivener_extract::FileExtractor;
    use scrivener_index::HashEmbedder;
    use scrivener_llm::MockSynthesizer;
    use std::io::Write;

    /// Extractor stub returning fixed text regardless of the file
    struct StubExtractor(String);

    impl TextExtractor for StubExtractor {
        type Error = std::io::Error;

        fn extract(&self, _path: &Path, _kind: FileKind) -> Result<String, Self::Error> {
            Ok(self.0.clone())
        }
    }

    /// Embedder that fails on every call
    struct FailingEmbedder;

    impl TextEmbedder for FailingEmbedder {
        type Error = String;

        fn embed(&self, _text: &str) -> Result<Vec<f32>, Self::Error> {
            Err("embedding backend down".to_string())
        }

        fn dimension(&self) -> usize {
            64
        }
    }

    fn offline_agent(config: AgentConfig) -> Agent<FileExtractor, HashEmbedder, MockSynthesizer> {
        Agent::new(FileExtractor::new(), HashEmbedder::new(64), None, config).unwrap()
    }

    fn ready_session(loaded: &LoadedDocument) -> SessionContext {
        let mut session = SessionContext::new();
        session.select(loaded.document().id);
        session
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AgentConfig::default();
        config.top_k = 0;

        let result = Agent::<FileExtractor, HashEmbedder, MockSynthesizer>::new(
            FileExtractor::new(),
            HashEmbedder::new(64),
            None,
            config,
        );
        assert!(matches!(result, Err(AgentError::Config(_))));
    }

    #[test]
    fn test_load_text_reaches_ready() {
        let agent = offline_agent(AgentConfig::default());
        let loaded = agent.load_text("notes.txt", "Some document text.").unwrap();

        assert_eq!(loaded.state(), LoadState::Ready);
        assert!(loaded.index().is_some());
        assert_eq!(loaded.index().unwrap().len(), loaded.document().chunk_count());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "contents on disk").unwrap();

        let agent = offline_agent(AgentConfig::default());
        let loaded = agent.load(file.path()).unwrap();

        assert_eq!(loaded.state(), LoadState::Ready);
        assert_eq!(loaded.document().text, "contents on disk");
    }

    #[test]
    fn test_load_unsupported_extension() {
        let agent = offline_agent(AgentConfig::default());
        let result = agent.load(Path::new("/tmp/archive.tar.gz"));

        assert!(matches!(result, Err(AgentError::Extraction(_))));
    }

    #[test]
    fn test_load_missing_file_leaves_no_document() {
        let agent = offline_agent(AgentConfig::default());
        let result = agent.load(Path::new("/nonexistent/notes.txt"));

        assert!(matches!(result, Err(AgentError::Extraction(_))));
    }

    #[test]
    fn test_empty_document_fails_index_build() {
        let agent = offline_agent(AgentConfig::default());
        let mut loaded = LoadedDocument::chunked(Document::new("empty.txt", "", 500));

        let result = agent.index_document(&mut loaded);

        assert!(matches!(result, Err(AgentError::Index(IndexError::EmptyBuild))));
        assert_eq!(loaded.state(), LoadState::Failed);
    }

    #[test]
    fn test_embedding_failure_marks_document_failed() {
        let agent = Agent::<FileExtractor, FailingEmbedder, MockSynthesizer>::new(
            FileExtractor::new(),
            FailingEmbedder,
            None,
            AgentConfig::default(),
        )
        .unwrap();

        let mut loaded = LoadedDocument::chunked(Document::new("a.txt", "some text", 4));
        let result = agent.index_document(&mut loaded);

        assert!(matches!(result, Err(AgentError::Embedding(_))));
        assert_eq!(loaded.state(), LoadState::Failed);
    }

    #[test]
    fn test_answer_before_ready_fails() {
        let agent = offline_agent(AgentConfig::default());
        let loaded = LoadedDocument::chunked(Document::new("a.txt", "some text", 4));
        let mut session = ready_session(&loaded);

        let result = agent.answer(&loaded, &mut session, "anything?");

        assert!(matches!(result, Err(AgentError::NotReady(LoadState::Chunked))));
        // Failed answers record nothing
        assert!(session.log(loaded.document().id).unwrap().is_empty());
    }

    #[test]
    fn test_answer_against_unselected_document_fails() {
        let agent = offline_agent(AgentConfig::default());
        let loaded = agent.load_text("a.txt", "some text").unwrap();

        let mut session = SessionContext::new();
        session.select(scrivener_domain::DocumentId::new());

        let result = agent.answer(&loaded, &mut session, "anything?");
        assert!(matches!(result, Err(AgentError::Retrieval(_))));
    }

    #[test]
    fn test_single_char_chunk_retrieval_scenario() {
        // 14 one-character chunks; the question text equals chunk "E", so
        // the deterministic embedder puts that chunk at distance zero
        let mut config = AgentConfig::default();
        config.chunk_size = 1;

        let agent = offline_agent(config);
        let loaded = agent.load_text("letters.txt", "A. B. C. D. E.").unwrap();

        assert_eq!(loaded.document().chunk_count(), 14);

        let embedder = HashEmbedder::new(64);
        let query = embedder.embed("E").unwrap();
        let neighbors = loaded.index().unwrap().query(&query, 1).unwrap();

        assert_eq!(neighbors[0].index, 12);
        assert_eq!(loaded.document().chunks[12].text, "E");
        assert_eq!(neighbors[0].distance, 0.0);

        // End to end: the nearest chunk leads the fallback context
        let mut session = ready_session(&loaded);
        let answer = agent.answer(&loaded, &mut session, "E").unwrap();
        let expected_start = format!("{}E", FALLBACK_PREFIX);
        assert!(answer.starts_with(&expected_start));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let agent = offline_agent(AgentConfig::default());
        let loaded = agent.load_text("a.txt", "Deterministic retrieval text.").unwrap();
        let mut session = ready_session(&loaded);

        let first = agent.answer(&loaded, &mut session, "what?").unwrap();
        let second = agent.answer(&loaded, &mut session, "what?").unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with(FALLBACK_PREFIX));
        assert!(first.ends_with(FALLBACK_TRUNCATION_MARKER));
    }

    #[test]
    fn test_fallback_bounds_context_length() {
        let mut config = AgentConfig::default();
        config.fallback_context_chars = 10;

        let agent = offline_agent(config);
        let loaded = agent
            .load_text("a.txt", "A context body far longer than ten characters.")
            .unwrap();
        let mut session = ready_session(&loaded);

        let answer = agent.answer(&loaded, &mut session, "what?").unwrap();
        let expected_len =
            FALLBACK_PREFIX.chars().count() + 10 + FALLBACK_TRUNCATION_MARKER.chars().count();

        assert_eq!(answer.chars().count(), expected_len);
    }

    #[test]
    fn test_synthesizer_answer_used_when_available() {
        let agent = Agent::new(
            FileExtractor::new(),
            HashEmbedder::new(64),
            Some(MockSynthesizer::new("A synthesized answer.")),
            AgentConfig::default(),
        )
        .unwrap();

        let loaded = agent.load_text("a.txt", "some text").unwrap();
        let mut session = ready_session(&loaded);

        let answer = agent.answer(&loaded, &mut session, "what?").unwrap();
        assert_eq!(answer, "A synthesized answer.");
    }

    #[test]
    fn test_failing_synthesizer_degrades_to_fallback() {
        let synthesizer = MockSynthesizer::failing();
        let agent = Agent::new(
            FileExtractor::new(),
            HashEmbedder::new(64),
            Some(synthesizer.clone()),
            AgentConfig::default(),
        )
        .unwrap();

        let loaded = agent.load_text("a.txt", "some text").unwrap();
        let mut session = ready_session(&loaded);

        let answer = agent.answer(&loaded, &mut session, "what?").unwrap();

        assert!(synthesizer.call_count() > 0);
        assert!(answer.starts_with(FALLBACK_PREFIX));
        assert!(answer.contains(FALLBACK_TRUNCATION_MARKER));

        // The degraded answer is still logged as a normal turn pair
        let log = session.log(loaded.document().id).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.turns()[0].role, Role::User);
        assert_eq!(log.turns()[0].message, "what?");
        assert_eq!(log.turns()[1].role, Role::Assistant);
        assert_eq!(log.turns()[1].message, answer);
    }

    #[test]
    fn test_turns_accumulate_across_questions() {
        let agent = offline_agent(AgentConfig::default());
        let loaded = agent.load_text("a.txt", "some text").unwrap();
        let mut session = ready_session(&loaded);

        agent.answer(&loaded, &mut session, "first?").unwrap();
        agent.answer(&loaded, &mut session, "second?").unwrap();

        let log = session.log(loaded.document().id).unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(log.turns()[2].message, "second?");
    }

    #[test]
    fn test_reload_unchanged_is_noop() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "stable contents").unwrap();
        file.flush().unwrap();

        let agent = offline_agent(AgentConfig::default());
        let loaded = agent.load(file.path()).unwrap();

        let result = agent.reload(file.path(), Some(&loaded)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_reload_changed_content_rebuilds() {
        let agent = Agent::<StubExtractor, HashEmbedder, MockSynthesizer>::new(
            StubExtractor("new contents".to_string()),
            HashEmbedder::new(64),
            None,
            AgentConfig::default(),
        )
        .unwrap();

        // Current handle was built from different text
        let current = LoadedDocument {
            document: Document::new("notes.txt", "old contents", 500),
            index: None,
            state: LoadState::Ready,
        };

        let result = agent.reload(Path::new("notes.txt"), Some(&current)).unwrap();
        let fresh = result.expect("changed content should rebuild");

        assert_eq!(fresh.document().text, "new contents");
        assert_ne!(fresh.document().id, current.document().id);
    }

    #[test]
    fn test_reload_without_current_loads() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "fresh contents").unwrap();

        let agent = offline_agent(AgentConfig::default());
        let result = agent.reload(file.path(), None).unwrap();

        assert!(result.is_some());
    }

    #[test]
    fn test_fallback_answer_pure_function() {
        assert_eq!(fallback_answer("ctx", 500), fallback_answer("ctx", 500));
        assert_eq!(
            fallback_answer("abcdef", 3),
            format!("{}abc{}", FALLBACK_PREFIX, FALLBACK_TRUNCATION_MARKER)
        );
    }
}
