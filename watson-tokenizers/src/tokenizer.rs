use std::collections::HashMap as StdHashMap;
use std::path::Path;

use log::debug;

use super::config::{TokenizerConfig, TokenizerInputFileType, TokenizerType};
use super::error::TokenizerError;
use super::utils::prepare_vocab_and_special_tokens;
use super::huggingface::HuggingFaceTokenizer;
use super::utils::build_word_level_pipeline;
use super::utils::special_tokens::SpecialTokens;
use super::vocab::Vocab;

///
/// A subword tokenizer, as seen by the pair encoder: text in, ordered tokens out,
/// plus a vocabulary to turn those tokens into ids.
///
pub trait SubwordTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError>;

    fn convert_token_to_id(&self, token: &str) -> Option<u32>;

    fn special_tokens(&self) -> &SpecialTokens;

    fn get_vocab_size(&self) -> usize;

    ///
    /// Map tokens to ids. A token missing from the vocabulary is an error,
    /// unknown-word substitution is the job of `tokenize`.
    ///
    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>, TokenizerError> {
        tokens
            .iter()
            .map(|token| {
                self.convert_token_to_id(token)
                    .ok_or_else(|| TokenizerError::UnknownToken(token.clone()))
            })
            .collect()
    }

    fn special_token_id(&self, token: &str) -> Result<u32, TokenizerError> {
        self.convert_token_to_id(token)
            .ok_or_else(|| TokenizerError::MissingSpecialToken(token.to_string()))
    }

    fn get_cls_token_id(&self) -> Result<u32, TokenizerError> {
        self.special_token_id(&self.special_tokens().cls)
    }

    fn get_sep_token_id(&self) -> Result<u32, TokenizerError> {
        self.special_token_id(&self.special_tokens().sep)
    }

    fn get_pad_token_id(&self) -> Result<u32, TokenizerError> {
        self.special_token_id(&self.special_tokens().pad)
    }

    fn get_unk_token_id(&self) -> Result<u32, TokenizerError> {
        self.special_token_id(&self.special_tokens().unk)
    }

    fn get_mask_token_id(&self) -> Result<u32, TokenizerError> {
        self.special_token_id(&self.special_tokens().mask)
    }
}

///
/// Whole-word tokenizer over a BERT vocab file. Words are split BERT-style
/// and looked up verbatim; anything outside the vocab becomes the unknown token.
///
#[derive(Clone)]
pub struct WordLevelTokenizer {
    vocab: Vocab,
    special_tokens: SpecialTokens,
    pipeline: tokenizers::Tokenizer,
}

impl WordLevelTokenizer {
    pub fn new(
        vocab: Vocab,
        special_tokens: SpecialTokens,
        lowercase: bool,
    ) -> Result<Self, TokenizerError> {
        let pipeline = build_word_level_pipeline(&vocab, &special_tokens, lowercase)?;
        Ok(Self {
            vocab,
            special_tokens,
            pipeline,
        })
    }

    pub fn from_vocab<P: AsRef<Path>>(
        vocab_path: P,
        special_tokens: SpecialTokens,
        lowercase: bool,
    ) -> Result<Self, TokenizerError> {
        let (vocab, special_tokens) =
            prepare_vocab_and_special_tokens(vocab_path.as_ref(), special_tokens)?;
        debug!(
            "Loaded word-level vocab of {} tokens from {:?}",
            vocab.len(),
            vocab_path.as_ref()
        );
        Self::new(vocab, special_tokens, lowercase)
    }

    pub fn decode(&self, ids: &[u32]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.vocab
                    .convert_id_to_token(*id)
                    .unwrap_or(self.special_tokens.unk.clone())
            })
            .collect()
    }

    pub fn get_vocab(&self) -> StdHashMap<String, u32> {
        self.vocab.to_map()
    }

    pub fn get_vocab_ref(&self) -> &Vocab {
        &self.vocab
    }
}

impl SubwordTokenizer for WordLevelTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        let encoding = self
            .pipeline
            .encode(text, false)
            .map_err(|e| TokenizerError::External(e.to_string()))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn convert_token_to_id(&self, token: &str) -> Option<u32> {
        self.vocab.convert_token_to_id(token)
    }

    fn special_tokens(&self) -> &SpecialTokens {
        &self.special_tokens
    }

    fn get_vocab_size(&self) -> usize {
        self.vocab.len()
    }
}

///
/// Every tokenizer backend this crate can build from files on disk.
///
pub enum Tokenizer {
    WordLevel(WordLevelTokenizer),
    HuggingFace(HuggingFaceTokenizer),
}

impl Tokenizer {
    ///
    /// Create a new tokenizer from a config file. The vocab path in the
    /// config is resolved relative to the config file.
    ///
    pub fn from_config<P: AsRef<Path>>(cfg_path: P) -> Result<Self, TokenizerError> {
        let config = TokenizerConfig::try_from(cfg_path.as_ref())?;

        let config_dir = cfg_path.as_ref().parent().unwrap_or(Path::new("."));
        let vocab_path = config_dir.join(&config.vocab);
        let special_tokens = match config.special_tokens {
            Some(tokens) => SpecialTokens::from(tokens),
            None => SpecialTokens::default(),
        };

        match config.tokenizer_type.unwrap_or(TokenizerType::WordLevel) {
            TokenizerType::WordLevel => Ok(Tokenizer::WordLevel(WordLevelTokenizer::from_vocab(
                vocab_path,
                special_tokens,
                config.lowercase,
            )?)),
            TokenizerType::HuggingFace => Ok(Tokenizer::HuggingFace(
                HuggingFaceTokenizer::from_file(vocab_path, special_tokens)?,
            )),
        }
    }

    ///
    /// Create a new word-level tokenizer from a vocab file with default special tokens
    ///
    pub fn from_vocab<P: AsRef<Path>>(vocab_path: P) -> Result<Self, TokenizerError> {
        Ok(Tokenizer::WordLevel(WordLevelTokenizer::from_vocab(
            vocab_path,
            SpecialTokens::default(),
            false,
        )?))
    }

    ///
    /// Create a new tokenizer from a pre-trained model on the hub, or a local
    /// directory holding its `tokenizer.json`
    ///
    #[cfg(feature = "huggingface")]
    pub fn from_pretrained(name: &str) -> Result<Self, TokenizerError> {
        Ok(Tokenizer::HuggingFace(HuggingFaceTokenizer::from_pretrained(
            name,
        )?))
    }

    ///
    /// Create a new tokenizer from a file, automatically detecting the type
    ///
    pub fn from_auto<P: AsRef<Path>>(path: P) -> Result<Self, TokenizerError> {
        let file_type = TokenizerInputFileType::from_path(path.as_ref())?;
        match file_type {
            TokenizerInputFileType::Toml => Tokenizer::from_config(path),
            TokenizerInputFileType::Vocab => Tokenizer::from_vocab(path),
            TokenizerInputFileType::VocabGz => Tokenizer::from_vocab(path),
            TokenizerInputFileType::Json => Ok(Tokenizer::HuggingFace(
                HuggingFaceTokenizer::from_file(path, SpecialTokens::default())?,
            )),
        }
    }

    fn inner(&self) -> &dyn SubwordTokenizer {
        match self {
            Tokenizer::WordLevel(t) => t as &dyn SubwordTokenizer,
            Tokenizer::HuggingFace(t) => t as &dyn SubwordTokenizer,
        }
    }
}

impl SubwordTokenizer for Tokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        self.inner().tokenize(text)
    }

    fn convert_token_to_id(&self, token: &str) -> Option<u32> {
        self.inner().convert_token_to_id(token)
    }

    fn special_tokens(&self) -> &SpecialTokens {
        self.inner().special_tokens()
    }

    fn get_vocab_size(&self) -> usize {
        self.inner().get_vocab_size()
    }
}

#[cfg(test)]
mod tokenizer_tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn tokenizer() -> Tokenizer {
        Tokenizer::from_config("../tests/data/tokenizers/tokenizer.toml")
            .expect("Failed to create tokenizer from config.")
    }

    #[rstest]
    fn test_tokenizer_creation_from_config(tokenizer: Tokenizer) {
        assert_eq!(tokenizer.get_vocab_size(), 160);
    }

    #[rstest]
    #[case("../tests/data/tokenizers/vocab.txt")]
    #[case("../tests/data/tokenizers/vocab.txt.gz")]
    #[case("../tests/data/tokenizers/tokenizer.toml")]
    fn test_tokenizer_creation_auto_all(#[case] path: &str) {
        let tokenizer = Tokenizer::from_auto(path).expect("Failed to create tokenizer.");
        assert_eq!(tokenizer.get_vocab_size(), 160);
        assert_eq!(tokenizer.get_cls_token_id().unwrap(), 101);
        assert_eq!(tokenizer.get_sep_token_id().unwrap(), 102);
    }

    #[rstest]
    fn test_tokenizer_bad_extension() {
        let tokenizer = Tokenizer::from_auto("../tests/data/nli/train.csv");
        assert_eq!(tokenizer.is_err(), true);
    }

    #[rstest]
    fn test_huggingface_from_config() {
        let tokenizer =
            Tokenizer::from_config("../tests/data/tokenizers/tokenizer_hf.toml").unwrap();
        assert!(matches!(tokenizer, Tokenizer::HuggingFace(_)));

        let tokens = tokenizer.tokenize("I love museums").unwrap();
        assert_eq!(tokens, vec!["I", "love", "museum", "##s"]);
        assert_eq!(
            tokenizer.convert_tokens_to_ids(&tokens).unwrap(),
            vec![104, 105, 116, 160]
        );
    }

    #[rstest]
    fn test_huggingface_from_auto_json() {
        let tokenizer = Tokenizer::from_auto("../tests/data/tokenizers/tokenizer.json").unwrap();
        assert_eq!(tokenizer.get_vocab_size(), 162);
        assert_eq!(tokenizer.get_cls_token_id().unwrap(), 101);
    }

    #[rstest]
    fn test_tokenizer_custom_special_tokens() {
        let cfg_path = "../tests/data/tokenizers/tokenizer_custom_specials.toml";
        let tokenizer =
            Tokenizer::from_config(cfg_path).expect("Failed to create tokenizer from config.");

        // `<UNKNOWN>` is not in the vocab file, so it is appended
        assert_eq!(tokenizer.get_vocab_size(), 161);
        assert_eq!(tokenizer.special_tokens().unk, "<UNKNOWN>");
        assert_eq!(tokenizer.get_unk_token_id().unwrap(), 160);

        // check that pad didnt change
        assert_eq!(tokenizer.special_tokens().pad, "[PAD]");
        assert_eq!(tokenizer.get_pad_token_id().unwrap(), 0);
    }

    #[rstest]
    fn test_tokenize_known_words(tokenizer: Tokenizer) {
        let tokens = tokenizer.tokenize("I love you").unwrap();
        assert_eq!(tokens, vec!["I", "love", "you"]);

        let ids = tokenizer.convert_tokens_to_ids(&tokens).unwrap();
        assert_eq!(ids, vec![104, 105, 106]);
    }

    #[rstest]
    fn test_tokenize_unknown_word_becomes_unk(tokenizer: Tokenizer) {
        let tokens = tokenizer.tokenize("I love pizza.").unwrap();
        assert_eq!(tokens, vec!["I", "love", "[UNK]", "."]);
    }

    #[rstest]
    fn test_tokenize_is_case_sensitive_by_default(tokenizer: Tokenizer) {
        let tokens = tokenizer.tokenize("HELLO world").unwrap();
        assert_eq!(tokens, vec!["[UNK]", "world"]);
    }

    #[rstest]
    fn test_tokenize_lowercase() {
        let tokenizer =
            Tokenizer::from_config("../tests/data/tokenizers/tokenizer_fixed_len.toml").unwrap();
        let tokens = tokenizer.tokenize("HELLO World").unwrap();
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[rstest]
    fn test_tokenize_keeps_special_tokens_whole() {
        let tokenizer =
            Tokenizer::from_config("../tests/data/tokenizers/tokenizer_fixed_len.toml").unwrap();
        let tokens = tokenizer.tokenize("Hello [SEP] World").unwrap();
        assert_eq!(tokens, vec!["hello", "[SEP]", "world"]);
    }

    #[rstest]
    #[case("मैं घर गया।", vec!["मैं", "घर", "गया", "।"])]
    #[case("他说：你好", vec!["他", "说", "：", "你", "好"])]
    #[case("«Bonjour»·fin", vec!["«", "Bonjour", "»", "·", "fin"])]
    #[case("「こんにちは」", vec!["「", "こんにちは", "」"])]
    #[case("¿Dónde está?", vec!["¿", "Dónde", "está", "?"])]
    #[case("  hello,   world! ", vec!["hello", ",", "world", "!"])]
    #[case("   ", vec![])]
    fn test_tokenize_multilingual_punctuation(#[case] text: &str, #[case] expected: Vec<&str>) {
        let words = [
            "मैं", "घर", "गया", "।", "他", "说", "：", "你", "好", "«", "Bonjour", "»", "·", "fin",
            "「", "こんにちは", "」", "¿", "Dónde", "está", "?", "hello", ",", "world", "!",
        ];
        let mut vocab = Vocab::from_tokens(words.iter().map(|w| w.to_string()).collect()).unwrap();
        let special_tokens = SpecialTokens::default();
        vocab.add_special_tokens(&special_tokens);
        let tokenizer = WordLevelTokenizer::new(vocab, special_tokens, false).unwrap();

        let tokens = tokenizer.tokenize(text).unwrap();
        assert_eq!(tokens, expected);
        // every piece is a known word
        assert!(!tokens.contains(&"[UNK]".to_string()));
    }

    #[rstest]
    fn test_convert_unknown_token_is_error(tokenizer: Tokenizer) {
        let result = tokenizer.convert_tokens_to_ids(&["pizza".to_string()]);
        assert!(matches!(result, Err(TokenizerError::UnknownToken(t)) if t == "pizza"));
    }

    #[rstest]
    fn test_missing_special_token() {
        let vocab = Vocab::from_tokens(vec!["hello".to_string()]).unwrap();
        let tokenizer = WordLevelTokenizer::new(vocab, SpecialTokens::default(), false).unwrap();

        let result = tokenizer.get_cls_token_id();
        assert!(matches!(result, Err(TokenizerError::MissingSpecialToken(t)) if t == "[CLS]"));
    }

    #[rstest]
    fn test_decode() {
        let tokenizer = WordLevelTokenizer::from_vocab(
            "../tests/data/tokenizers/vocab.txt",
            SpecialTokens::default(),
            false,
        )
        .unwrap();
        let decoded = tokenizer.decode(&[101, 104, 105, 106, 102, 9999]);
        assert_eq!(decoded, vec!["[CLS]", "I", "love", "you", "[SEP]", "[UNK]"]);
        assert_eq!(tokenizer.get_vocab().len(), 160);
    }
}
