use tracing::{debug, info};

use crate::core::{FlankPair, IndelEvent, IndelSides, IndelType, MatchResult, Variant};
use crate::microhomology::classifier::{classify, Classification, SkipReason};
use crate::microhomology::matcher;
use crate::microhomology::normalize::normalize;
use crate::microhomology::window::{plan_deleted_span, plan_flanks, DeletionWindows};
use crate::parsing::{ParseError, SequenceProvider, VariantSource};

/// Default bound on deleted-span windows
pub const DEFAULT_MAX_FLANKING: u64 = 1000;

/// Configuration for a microhomology run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallConfig {
    /// Skip variants that fail FILTER
    pub passing_only: bool,
    /// Minimum indel length to report
    pub min_length: u64,
    /// Bound on how much of a long deleted span is read at each end
    pub max_flanking: u64,
    /// INFO key holding the end coordinate of a deletion
    pub end_key: Option<String>,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            passing_only: false,
            min_length: 0,
            max_flanking: DEFAULT_MAX_FLANKING,
            end_key: None,
        }
    }
}

/// Running counters for one pass over a variant stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub records: u64,
    pub filtered: u64,
    pub symbolic: u64,
    pub breakends: u64,
    pub substitutions: u64,
    pub below_min_length: u64,
    pub empty: u64,
    pub insertions: u64,
    pub deletions: u64,
}

impl RunStats {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Filtered => self.filtered += 1,
            SkipReason::SymbolicAllele => self.symbolic += 1,
            SkipReason::Breakend => self.breakends += 1,
            SkipReason::Substitution => self.substitutions += 1,
            SkipReason::BelowMinLength => self.below_min_length += 1,
            SkipReason::EmptyIndel => self.empty += 1,
        }
    }

    fn record_emit(&mut self, kind: IndelType) {
        match kind {
            IndelType::Insertion => self.insertions += 1,
            IndelType::Deletion => self.deletions += 1,
        }
    }

    pub fn emitted(&self) -> u64 {
        self.insertions + self.deletions
    }

    pub fn skipped(&self) -> u64 {
        self.records - self.emitted()
    }
}

/// Measures microhomology for one variant at a time
pub struct MicrohomologyEngine<P> {
    reference: P,
    config: CallConfig,
    stats: RunStats,
}

impl<P: SequenceProvider> MicrohomologyEngine<P> {
    pub fn with_config(reference: P, config: CallConfig) -> Self {
        Self {
            reference,
            config,
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Classify, normalize and score one variant. `Ok(None)` means skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be read.
    pub fn process(&mut self, variant: &Variant) -> Result<Option<MatchResult>, ParseError> {
        self.stats.records += 1;

        let event = match self.build_event(variant)? {
            Ok(event) => event,
            Err(reason) => {
                debug!("Skipping {}:{} ({reason:?})", variant.chrom, variant.pos);
                self.stats.record_skip(reason);
                return Ok(None);
            }
        };

        let result = self.score_event(event)?;
        self.stats.record_emit(result.event.kind);
        Ok(Some(result))
    }

    /// Process every variant from `source`, passing each result to `emit`.
    ///
    /// # Errors
    ///
    /// Stops at the first read error, reference error, or error from `emit`.
    pub fn run<S, F, E>(&mut self, source: &mut S, mut emit: F) -> Result<RunStats, E>
    where
        S: VariantSource,
        F: FnMut(&MatchResult) -> Result<(), E>,
        E: From<ParseError>,
    {
        while let Some(variant) = source.next_variant() {
            if let Some(result) = self.process(&variant?)? {
                emit(&result)?;
            }
        }

        info!(
            "Processed {} records: {} insertions, {} deletions, {} skipped",
            self.stats.records,
            self.stats.insertions,
            self.stats.deletions,
            self.stats.skipped()
        );
        Ok(self.stats)
    }

    fn build_event(
        &mut self,
        variant: &Variant,
    ) -> Result<Result<IndelEvent, SkipReason>, ParseError> {
        let kind = match classify(variant, &self.config) {
            Classification::Skip(reason) => return Ok(Err(reason)),
            Classification::Insertion => IndelType::Insertion,
            Classification::Deletion => IndelType::Deletion,
            Classification::RangedDeletion { del_len } => {
                if del_len < self.config.min_length {
                    return Ok(Err(SkipReason::BelowMinLength));
                }
                let sides = self.read_deleted_span(&variant.chrom, variant.pos, del_len)?;
                return Ok(Ok(event_for(variant, IndelType::Deletion, del_len, variant.pos, sides)));
            }
        };

        let Some(indel) = normalize(
            &variant.ref_allele,
            &variant.alt_allele,
            kind,
            self.config.min_length,
        ) else {
            return Ok(Err(SkipReason::BelowMinLength));
        };
        if indel.is_empty() {
            return Ok(Err(SkipReason::EmptyIndel));
        }

        // the left breakpoint follows the last shared base
        let breakpoint = (variant.pos + indel.prefix_len as u64).saturating_sub(1);
        let length = indel.len() as u64;

        Ok(Ok(event_for(
            variant,
            kind,
            length,
            breakpoint,
            IndelSides::Single(indel.sequence),
        )))
    }

    fn read_deleted_span(
        &mut self,
        chrom: &str,
        start: u64,
        del_len: u64,
    ) -> Result<IndelSides, ParseError> {
        match plan_deleted_span(start, del_len, self.config.max_flanking) {
            DeletionWindows::Whole(span) => {
                debug!("{chrom}:{start}: deleted span shorter than the flanking bound, reading whole");
                let seq = self.reference.fetch(chrom, span.start, span.end)?;
                Ok(IndelSides::Single(seq))
            }
            DeletionWindows::Split { left, right } => Ok(IndelSides::Pair {
                left: self.reference.fetch(chrom, left.start, left.end)?,
                right: self.reference.fetch(chrom, right.start, right.end)?,
            }),
        }
    }

    fn score_event(&mut self, event: IndelEvent) -> Result<MatchResult, ParseError> {
        let left_side = event.sides.left();
        let right_side = event.sides.right();

        let windows = plan_flanks(
            event.breakpoint,
            event.right_breakpoint(),
            left_side.len() as u64,
            right_side.len() as u64,
        );

        let flanks = FlankPair {
            left: self
                .reference
                .fetch(&event.chrom, windows.left.start, windows.left.end)?,
            right: self
                .reference
                .fetch(&event.chrom, windows.right.start, windows.right.end)?,
        };

        let counts = matcher::score(&flanks.left, &flanks.right, left_side, right_side);

        Ok(MatchResult {
            event,
            flanks,
            left_matches: counts.left,
            right_matches: counts.right,
        })
    }
}

fn event_for(
    variant: &Variant,
    kind: IndelType,
    length: u64,
    breakpoint: u64,
    sides: IndelSides,
) -> IndelEvent {
    let end = match kind {
        IndelType::Insertion => variant.pos,
        IndelType::Deletion => variant.pos + length,
    };

    IndelEvent {
        kind,
        chrom: variant.chrom.clone(),
        pos: variant.pos,
        end,
        breakpoint,
        length,
        sides,
        ref_allele: variant.ref_allele.clone(),
        alt_allele: variant.alt_allele.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InfoValue;
    use crate::parsing::fasta::InMemoryReference;

    fn contig(len: usize, fill: u8, patches: &[(usize, &str)]) -> String {
        let mut bases = vec![fill; len];
        for (offset, seq) in patches {
            bases[*offset..*offset + seq.len()].copy_from_slice(seq.as_bytes());
        }
        String::from_utf8(bases).unwrap()
    }

    fn engine(sequence: String, config: CallConfig) -> MicrohomologyEngine<InMemoryReference> {
        let reference = InMemoryReference::new().with_contig("chr1", sequence);
        MicrohomologyEngine::with_config(reference, config)
    }

    #[test]
    fn test_insertion_scenario() {
        let mut engine = engine(contig(200, b'G', &[(98, "TTAA")]), CallConfig::default());
        let variant = Variant::new("chr1", 100, "A", "ATT");

        let result = engine.process(&variant).unwrap().unwrap();
        assert_eq!(result.event.kind, IndelType::Insertion);
        assert_eq!(result.event.sides, IndelSides::Single("TT".to_string()));
        assert_eq!(result.event.length, 2);
        assert_eq!(result.event.end, 100);
        assert_eq!(result.flanks.left, "TT");
        assert_eq!(result.flanks.right, "AA");
        assert_eq!(result.left_matches, 2);
        assert_eq!(result.right_matches, 0);
    }

    #[test]
    fn test_short_deletion_scenario() {
        let mut engine = engine(contig(200, b'A', &[(98, "GCTTTTAA")]), CallConfig::default());
        let variant = Variant::new("chr1", 100, "ATT", "A");

        let result = engine.process(&variant).unwrap().unwrap();
        assert_eq!(result.event.kind, IndelType::Deletion);
        assert_eq!(result.event.sides.left(), "TT");
        assert_eq!(result.event.end, 102);
        assert_eq!(result.flanks.left, "GC");
        assert_eq!(result.flanks.right, "TT");
        assert_eq!(result.left_matches, 0);
        assert_eq!(result.right_matches, 2);
    }

    #[test]
    fn test_below_threshold_skipped() {
        let config = CallConfig {
            min_length: 5,
            ..CallConfig::default()
        };
        let mut engine = engine(contig(200, b'A', &[]), config);

        assert!(engine.process(&Variant::new("chr1", 100, "ATT", "A")).unwrap().is_none());
        assert_eq!(engine.stats().below_min_length, 1);
    }

    #[test]
    fn test_symbolic_duplication_skipped() {
        let config = CallConfig {
            end_key: Some("END".to_string()),
            ..CallConfig::default()
        };
        let mut engine = engine(contig(200, b'A', &[]), config);
        let variant = Variant::new("chr1", 100, "ACGT", "<DUP>").with_info("END", InfoValue::Integer(150));

        assert!(engine.process(&variant).unwrap().is_none());
        assert_eq!(engine.stats().symbolic, 1);
    }

    #[test]
    fn test_long_range_deletion_windowing() {
        let near = "C".repeat(1000);
        let far = "G".repeat(1000);
        let sequence = contig(
            8000,
            b'A',
            &[(997, "GGG"), (1000, near.as_str()), (5000, far.as_str()), (6000, "CC")],
        );
        let config = CallConfig {
            end_key: Some("END".to_string()),
            ..CallConfig::default()
        };
        let mut engine = engine(sequence, config);
        let variant = Variant::new("chr1", 1000, "N", "<DEL>").with_info("END", InfoValue::Integer(6000));

        let result = engine.process(&variant).unwrap().unwrap();
        let IndelSides::Pair { left, right } = &result.event.sides else {
            panic!("expected windowed deletion");
        };
        assert_eq!(left.len(), 1000);
        assert_eq!(right.len(), 1000);
        assert!(left.bytes().all(|b| b == b'C'));
        assert!(right.bytes().all(|b| b == b'G'));

        assert_eq!(result.event.length, 5000);
        assert_eq!(result.event.end, 6000);
        assert_eq!(result.flanks.left.len(), 1000);
        assert_eq!(result.flanks.right.len(), 1000);
        assert_eq!(result.left_matches, 3);
        assert_eq!(result.right_matches, 2);
    }

    #[test]
    fn test_ranged_deletion_shorter_than_bound() {
        let sequence = contig(300, b'A', &[(96, "TTTT"), (100, "ACGTACGTAC"), (110, "ACG")]);
        let config = CallConfig {
            end_key: Some("END".to_string()),
            ..CallConfig::default()
        };
        let mut engine = engine(sequence, config);
        let variant = Variant::new("chr1", 100, "A", "<DEL>").with_info("END", InfoValue::Integer(110));

        let result = engine.process(&variant).unwrap().unwrap();
        assert_eq!(result.event.sides, IndelSides::Single("ACGTACGTAC".to_string()));
        assert_eq!(result.flanks.right, "ACGAAAAAAA");
        assert_eq!(result.left_matches, 0);
        assert_eq!(result.right_matches, 3);
    }

    #[test]
    fn test_ranged_deletion_respects_min_length() {
        let config = CallConfig {
            end_key: Some("END".to_string()),
            min_length: 100,
            ..CallConfig::default()
        };
        let mut engine = engine(contig(300, b'A', &[]), config);
        let variant = Variant::new("chr1", 100, "A", "<DEL>").with_info("END", InfoValue::Integer(150));

        assert!(engine.process(&variant).unwrap().is_none());
    }

    #[test]
    fn test_empty_trimmed_sequence_skipped() {
        let mut engine = engine(contig(200, b'A', &[]), CallConfig::default());
        let variant = Variant::new("chr1", 100, "AT", "ATT");

        assert!(engine.process(&variant).unwrap().is_none());
        assert_eq!(engine.stats().empty, 1);
    }

    #[test]
    fn test_breakpoint_after_longer_shared_prefix() {
        // REF=ACT ALT=AC at 100: the T at 1-based 102 is deleted
        let mut engine = engine(contig(200, b'A', &[(99, "ACTTG")]), CallConfig::default());
        let variant = Variant::new("chr1", 100, "ACT", "AC");

        let result = engine.process(&variant).unwrap().unwrap();
        assert_eq!(result.event.breakpoint, 101);
        assert_eq!(result.flanks.left, "C");
        assert_eq!(result.flanks.right, "T");
        assert_eq!(result.right_matches, 1);
    }

    #[test]
    fn test_flanks_clipped_at_contig_start() {
        let mut engine = engine("ATTTGGGG".to_string(), CallConfig::default());
        let variant = Variant::new("chr1", 1, "A", "ATTTT");

        let result = engine.process(&variant).unwrap().unwrap();
        assert_eq!(result.flanks.left, "A");
        assert_eq!(result.left_matches, 0);
        assert_eq!(result.flanks.right, "TTTG");
        assert_eq!(result.right_matches, 3);
    }

    #[test]
    fn test_run_collects_results_and_stats() {
        let mut engine = engine(contig(200, b'A', &[(98, "GCTTTTAA")]), CallConfig::default());
        let mut source = vec![
            Variant::new("chr1", 100, "ATT", "A"),
            Variant::new("chr1", 120, "A", "G"),
            Variant::new("chr1", 130, "A", "AC"),
            Variant::new("chr1", 140, "A", "<INV>"),
        ]
        .into_iter();

        let mut rows = Vec::new();
        let stats = engine
            .run(&mut source, |result| {
                rows.push(result.event.kind);
                Ok::<(), ParseError>(())
            })
            .unwrap();

        assert_eq!(rows, vec![IndelType::Deletion, IndelType::Insertion]);
        assert_eq!(stats.records, 4);
        assert_eq!(stats.deletions, 1);
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.substitutions, 1);
        assert_eq!(stats.symbolic, 1);
        assert_eq!(stats.skipped(), 2);
    }

    #[test]
    fn test_unknown_contig_is_an_error() {
        let mut engine = engine(contig(200, b'A', &[]), CallConfig::default());
        let variant = Variant::new("chr2", 100, "ATT", "A");

        assert!(matches!(
            engine.process(&variant),
            Err(ParseError::UnknownContig(_))
        ));
    }
}
