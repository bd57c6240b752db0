//! Extraction pipeline: load -> index -> walk -> project -> hand off.
//!
//! [`extract`] is the in-memory transform. [`run`] adds the file boundary:
//! it parses the input, extracts, and serializes the result, writing to a
//! temporary file first so a failed run never leaves partial output.

use crate::closure::{
    ancestors_of, ancestors_of_parallel, descendants_of, descendants_of_parallel, validate_target,
};
use crate::formats::{self, RdfFormat};
use crate::project::{Projector, RetentionPolicy};
use crate::vocab::{SKOS_BROADER, SKOS_COLLECTION, SKOS_CONCEPT_SCHEME, SKOS_IN_SCHEME, SKOS_MEMBER};
use crate::{ClosureSet, Error, HierarchyIndex, Result, Term, Triple, TripleStore};
use oxiri::Iri;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which concept schemes keep their own triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeRetention {
    /// Schemes are dropped unless they are in the closure.
    #[default]
    None,
    /// Schemes named by `skos:inScheme` on a kept concept.
    Referenced,
    /// Every subject typed `skos:ConceptScheme`.
    All,
}

/// Extraction configuration.
///
/// Every field has a default, so a TOML file may set any subset:
///
/// ```toml
/// target = "http://example.org/C3"
/// hierarchy_predicate = "http://www.w3.org/2004/02/skos/core#broader"
/// schemes = "referenced"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Concept whose subbranch is extracted (IRI, or `_:label` for a blank node).
    pub target: String,

    /// Predicate linking a concept to its broader concept.
    pub hierarchy_predicate: String,

    /// Also keep the transitive narrower concepts of the target.
    pub include_descendants: bool,

    /// Also keep `skos:member`s of the target (through nested collections)
    /// and their ancestors.
    pub follow_members: bool,

    /// Which concept schemes survive.
    pub schemes: SchemeRetention,

    /// Drop `broader`/`narrower` links whose object is not kept.
    pub prune_dangling: bool,

    /// Expand closure levels on the rayon pool.
    pub parallel: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            hierarchy_predicate: SKOS_BROADER.to_string(),
            include_descendants: false,
            follow_members: false,
            schemes: SchemeRetention::None,
            prune_dangling: false,
            parallel: false,
        }
    }
}

impl ExtractConfig {
    /// Config for `target` with every other field at its default.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Override the hierarchy predicate.
    pub fn with_hierarchy_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.hierarchy_predicate = predicate.into();
        self
    }

    /// Load a config from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// The target as a term.
    pub fn target_term(&self) -> Term {
        Term::from(self.target.as_str())
    }

    /// Check the target and predicate before any work is done.
    pub fn validate(&self) -> Result<()> {
        validate_target(&self.target_term())?;
        Iri::parse(self.hierarchy_predicate.as_str()).map_err(|e| Error::InvalidPredicate {
            iri: self.hierarchy_predicate.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Counts describing one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Target concept.
    pub target: String,
    /// Hierarchy predicate used.
    pub hierarchy_predicate: String,
    /// Distinct triples in the input.
    pub input_triples: usize,
    /// Concepts in the closure (target included).
    pub closure_size: usize,
    /// Largest hop distance from the target.
    pub closure_depth: usize,
    /// Concept schemes kept besides the closure.
    pub schemes_kept: usize,
    /// Triples in the output.
    pub retained_triples: usize,
    /// Triples dropped.
    pub dropped_triples: usize,
}

impl ExtractionReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of an in-memory extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Concepts kept.
    pub closure: ClosureSet,
    /// Retained triples, in input order.
    pub triples: Vec<Triple>,
    /// Summary counts.
    pub report: ExtractionReport,
}

/// Extract the subbranch described by `config` from `store`.
///
/// # Example
///
/// ```rust
/// use skosbranch_core::{extract, vocab, ExtractConfig, Term, Triple, TripleStore};
///
/// let store = TripleStore::load(vec![
///     Triple::new("http://ex/C3", vocab::SKOS_BROADER, "http://ex/C2"),
///     Triple::new("http://ex/C2", vocab::SKOS_BROADER, "http://ex/C1"),
///     Triple::new("http://ex/C4", vocab::SKOS_PREF_LABEL, Term::literal("Other")),
/// ])?;
///
/// let extraction = extract(&store, &ExtractConfig::new("http://ex/C3"))?;
/// assert_eq!(extraction.closure.len(), 3);
/// assert_eq!(extraction.triples.len(), 2);
/// # Ok::<(), skosbranch_core::Error>(())
/// ```
pub fn extract(store: &TripleStore, config: &ExtractConfig) -> Result<Extraction> {
    config.validate()?;
    let target = config.target_term();
    let predicate = config.hierarchy_predicate.as_str();

    let index = HierarchyIndex::build(store, predicate);
    let mut closure = walk(&target, &index, config)?;

    if config.follow_members {
        for (member, hops) in collection_members(store, &target) {
            closure = closure.union_at(&walk(&member, &index, config)?, hops);
        }
    }

    let schemes = kept_schemes(store, &closure, config.schemes);
    let schemes_kept = schemes.len();

    let policy = RetentionPolicy {
        extra_subjects: schemes,
        prune_dangling: config.prune_dangling,
    };
    let triples = Projector::new(predicate).with_policy(policy).project(store, &closure);

    let report = ExtractionReport {
        target: config.target.clone(),
        hierarchy_predicate: config.hierarchy_predicate.clone(),
        input_triples: store.len(),
        closure_size: closure.len(),
        closure_depth: closure.depth(),
        schemes_kept,
        retained_triples: triples.len(),
        dropped_triples: store.len() - triples.len(),
    };

    info!(
        concept = %report.target,
        closure = report.closure_size,
        depth = report.closure_depth,
        retained = report.retained_triples,
        dropped = report.dropped_triples,
        "extracted subbranch"
    );

    Ok(Extraction {
        closure,
        triples,
        report,
    })
}

type Walk = fn(&Term, &HierarchyIndex) -> Result<ClosureSet>;

/// Ancestors of `concept`, plus descendants when configured.
fn walk(concept: &Term, index: &HierarchyIndex, config: &ExtractConfig) -> Result<ClosureSet> {
    let (up, down): (Walk, Walk) = if config.parallel {
        (ancestors_of_parallel, descendants_of_parallel)
    } else {
        (ancestors_of, descendants_of)
    };

    let closure = up(concept, index)?;
    if config.include_descendants {
        Ok(closure.union(&down(concept, index)?))
    } else {
        Ok(closure)
    }
}

/// `skos:member` objects reachable from `start`, descending into nested
/// collections, with their `skos:member` distance from `start`. Each term is
/// reported once, at its shortest distance.
fn collection_members(store: &TripleStore, start: &Term) -> Vec<(Term, usize)> {
    let collections: HashSet<&Term> = store.subjects_of_type(SKOS_COLLECTION).collect();

    let mut seen: HashSet<&Term> = HashSet::from([start]);
    let mut queue: VecDeque<(&Term, usize)> = VecDeque::from([(start, 0)]);
    let mut members = Vec::new();

    while let Some((collection, depth)) = queue.pop_front() {
        for triple in store
            .triples_for(collection)
            .filter(|t| t.predicate == SKOS_MEMBER && t.object.is_resource())
        {
            let member = &triple.object;
            if !seen.insert(member) {
                continue;
            }
            members.push((member.clone(), depth + 1));
            if collections.contains(member) {
                queue.push_back((member, depth + 1));
            }
        }
    }

    debug!(start = %start, members = members.len(), "collected collection members");
    members
}

fn kept_schemes(store: &TripleStore, closure: &ClosureSet, mode: SchemeRetention) -> HashSet<Term> {
    match mode {
        SchemeRetention::None => HashSet::new(),
        SchemeRetention::Referenced => closure
            .iter()
            .flat_map(|concept| store.triples_for(concept))
            .filter(|t| t.predicate == SKOS_IN_SCHEME && t.object.is_resource())
            .map(|t| t.object.clone())
            .collect(),
        SchemeRetention::All => store
            .subjects_of_type(SKOS_CONCEPT_SCHEME)
            .cloned()
            .collect(),
    }
}

/// Default output path: `<stem>_reduced.<ext>` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    suffixed_path(input, "reduced")
}

/// `<stem>_<suffix>.<ext>` next to `input`.
pub fn suffixed_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    input.with_file_name(name)
}

/// Read `input`, extract, and write the result to `output`.
///
/// The input format comes from the input extension; the output format is
/// `format` or, when absent, inferred from the output extension.
pub fn run(
    input: &Path,
    output: &Path,
    format: Option<RdfFormat>,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    config.validate()?;
    let out_format = match format {
        Some(f) => f,
        None => RdfFormat::from_path(output)?,
    };

    let store = load_path(input)?;
    let extraction = extract(&store, config)?;
    write_atomic(&extraction.triples, output, out_format)?;

    info!(output = %output.display(), format = ?out_format, "wrote subbranch");
    Ok(extraction.report)
}

/// Parse a file into a store.
pub fn load_path(input: &Path) -> Result<TripleStore> {
    let triples = formats::read_path(input)?;
    debug!(input = %input.display(), parsed = triples.len(), "parsed input");
    TripleStore::load(triples)
}

/// Serialize to a hidden sibling file, then rename it over `output`.
pub fn write_atomic(triples: &[Triple], output: &Path, format: RdfFormat) -> Result<()> {
    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("output path has no file name: {}", output.display()),
            )
        })?;
    let tmp = output.with_file_name(format!(".{file_name}.tmp"));

    let written = File::create(&tmp)
        .map_err(Error::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            formats::write(triples, &mut writer, format)?;
            writer.flush()?;
            Ok(())
        })
        .and_then(|()| fs::rename(&tmp, output).map_err(Error::from));

    // The temp file must not outlive a failed write or rename.
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}
