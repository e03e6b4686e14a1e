//! Per-side pipeline: OCR text → species name → effectiveness → notification.

use anyhow::Result;
use std::sync::Arc;

use crate::engine::{effectiveness, NameResolver};
use crate::reference::ReferenceData;
use crate::tracker::config::{ScreenRect, TrackerConfig};
use crate::tracker::side::{Side, SideUpdate};

/// Produces raw OCR text for a screen region.
pub trait TextSource {
    fn capture_text(&mut self, side: Side, region: &ScreenRect) -> Result<String>;
}

/// Receives per-side results. An error stops the tracker.
pub trait SideSink {
    fn on_side_updated(&mut self, update: SideUpdate) -> Result<()>;

    /// Called once when the tracker loop exits, with the reason if it failed.
    fn on_stopped(&mut self, _error: Option<String>) {}
}

impl SideSink for std::sync::mpsc::Sender<SideUpdate> {
    fn on_side_updated(&mut self, update: SideUpdate) -> Result<()> {
        self.send(update)
            .map_err(|_| anyhow::anyhow!("Update receiver disconnected"))
    }
}

/// Resolver and reference tables shared by both sides.
#[derive(Clone, Debug)]
pub struct Pipeline {
    reference: Arc<ReferenceData>,
    resolver: NameResolver,
}

impl Pipeline {
    pub fn new(reference: Arc<ReferenceData>, config: &TrackerConfig) -> Result<Self> {
        let resolver = NameResolver::new(
            reference.species.names(),
            &config.level_prefixes,
            config.match_cutoff,
        )?;
        Ok(Self {
            reference,
            resolver,
        })
    }

    /// Resolves raw text for one side and computes its effectiveness.
    ///
    /// Unknown species are not an error: they carry no types and empty sets.
    pub fn process(&self, side: Side, raw_text: &str) -> Result<SideUpdate> {
        let resolution = self.resolver.resolve(raw_text);
        let types = self.reference.species.types_of(&resolution.name);
        let effectiveness = effectiveness(&self.reference.chart, types)?;

        match resolution.score {
            Some(score) => crate::log(&format!(
                "{}: '{}' -> '{}' matched {} ({:.2}) {:?}",
                side,
                raw_text.trim(),
                resolution.cleaned,
                resolution.name,
                score,
                types
            )),
            None => crate::log(&format!(
                "{}: '{}' -> '{}' (no match)",
                side,
                raw_text.trim(),
                resolution.cleaned
            )),
        }

        Ok(SideUpdate {
            side,
            raw_text: raw_text.to_string(),
            name: resolution.name,
            types: types.to_vec(),
            effectiveness,
        })
    }

    /// Runs both sides once, in order.
    ///
    /// A failed capture counts as empty text for that side only.
    pub fn run_tick<T, K>(
        &self,
        source: &mut T,
        sink: &mut K,
        config: &TrackerConfig,
    ) -> Result<()>
    where
        T: TextSource + ?Sized,
        K: SideSink + ?Sized,
    {
        for side in Side::ALL {
            let raw_text = match source.capture_text(side, config.region(side)) {
                Ok(text) => text,
                Err(e) => {
                    crate::log(&format!("{}: capture failed: {}", side, e));
                    String::new()
                }
            };
            let update = self.process(side, &raw_text)?;
            sink.on_side_updated(update)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::Effectiveness;
    use crate::reference::{SpeciesTable, TypeChart};
    use anyhow::anyhow;
    use std::collections::{BTreeSet, HashMap};

    pub(crate) fn bundled_reference() -> Arc<ReferenceData> {
        let chart = TypeChart::from_json_str(include_str!("../../data/type_chart.json")).unwrap();
        let species =
            SpeciesTable::from_json_str(include_str!("../../data/pokemon_types.json"), &chart)
                .unwrap();
        Arc::new(ReferenceData { chart, species })
    }

    /// Returns canned text per side; a missing side fails.
    pub(crate) struct ScriptedSource {
        pub texts: HashMap<Side, String>,
        pub calls: Vec<(Side, ScreenRect)>,
    }

    impl ScriptedSource {
        pub(crate) fn new(texts: &[(Side, &str)]) -> Self {
            Self {
                texts: texts.iter().map(|(s, t)| (*s, t.to_string())).collect(),
                calls: Vec::new(),
            }
        }
    }

    impl TextSource for ScriptedSource {
        fn capture_text(&mut self, side: Side, region: &ScreenRect) -> Result<String> {
            self.calls.push((side, *region));
            self.texts
                .get(&side)
                .cloned()
                .ok_or_else(|| anyhow!("window not visible"))
        }
    }

    #[derive(Default)]
    struct VecSink {
        updates: Vec<SideUpdate>,
    }

    impl SideSink for VecSink {
        fn on_side_updated(&mut self, update: SideUpdate) -> Result<()> {
            self.updates.push(update);
            Ok(())
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_process_known_species() {
        let pipeline = Pipeline::new(bundled_reference(), &TrackerConfig::default()).unwrap();
        let update = pipeline.process(Side::Rival, "Charizard Lv.50").unwrap();

        assert_eq!(update.name, "Charizard");
        assert_eq!(update.types, vec!["Fire", "Flying"]);
        assert_eq!(
            update.effectiveness.weak_to,
            set(&["Electric", "Rock", "Water"])
        );
        assert_eq!(update.effectiveness.immune_to, set(&["Ground"]));
    }

    #[test]
    fn test_process_prefers_exact_name_over_longer_neighbour() {
        let pipeline = Pipeline::new(bundled_reference(), &TrackerConfig::default()).unwrap();
        let update = pipeline.process(Side::Rival, "Azurill Lv.5").unwrap();

        assert_eq!(update.name, "Azurill");
        assert_eq!(update.types, vec!["Normal", "Fairy"]);
        assert_eq!(update.effectiveness.weak_to, set(&["Poison", "Steel"]));
        assert_eq!(update.effectiveness.immune_to, set(&["Dragon", "Ghost"]));
    }

    #[test]
    fn test_process_fuzzy_match_on_full_table() {
        let pipeline = Pipeline::new(bundled_reference(), &TrackerConfig::default()).unwrap();
        let update = pipeline.process(Side::Mine, "Amoongus Lv.41").unwrap();

        assert_eq!(update.name, "Amoonguss");
        assert_eq!(update.types, vec!["Grass", "Poison"]);
        assert_eq!(
            update.effectiveness.weak_to,
            set(&["Fire", "Flying", "Ice", "Psychic"])
        );
    }

    #[test]
    fn test_process_unknown_species() {
        let pipeline = Pipeline::new(bundled_reference(), &TrackerConfig::default()).unwrap();
        let update = pipeline.process(Side::Mine, "Zzzzzz Lv.5").unwrap();

        assert_eq!(update.name, "Zzzzzz");
        assert!(update.types.is_empty());
        assert_eq!(update.effectiveness, Effectiveness::default());
    }

    #[test]
    fn test_tick_processes_both_sides_in_order() {
        let config = TrackerConfig::default();
        let pipeline = Pipeline::new(bundled_reference(), &config).unwrap();
        let mut source =
            ScriptedSource::new(&[(Side::Mine, "Pikachu Lv.20"), (Side::Rival, "GENGAR")]);
        let mut sink = VecSink::default();

        pipeline.run_tick(&mut source, &mut sink, &config).unwrap();

        assert_eq!(
            source.calls,
            vec![
                (Side::Mine, config.mine_region),
                (Side::Rival, config.rival_region)
            ]
        );
        let names: Vec<(Side, &str)> = sink
            .updates
            .iter()
            .map(|u| (u.side, u.name.as_str()))
            .collect();
        assert_eq!(names, vec![(Side::Mine, "Pikachu"), (Side::Rival, "Gengar")]);
    }

    #[test]
    fn test_failed_capture_is_empty_text() {
        let config = TrackerConfig::default();
        let pipeline = Pipeline::new(bundled_reference(), &config).unwrap();
        let mut source = ScriptedSource::new(&[(Side::Rival, "Snorlax")]);
        let mut sink = VecSink::default();

        pipeline.run_tick(&mut source, &mut sink, &config).unwrap();

        assert_eq!(sink.updates.len(), 2);
        let mine = &sink.updates[0];
        assert_eq!(mine.side, Side::Mine);
        assert_eq!(mine.raw_text, "");
        assert_eq!(mine.name, "");
        assert_eq!(mine.effectiveness, Effectiveness::default());
        assert_eq!(sink.updates[1].name, "Snorlax");
        assert_eq!(sink.updates[1].effectiveness.weak_to, set(&["Fighting"]));
    }

    #[test]
    fn test_sink_error_aborts_tick() {
        struct ClosedSink;
        impl SideSink for ClosedSink {
            fn on_side_updated(&mut self, _update: SideUpdate) -> Result<()> {
                Err(anyhow!("closed"))
            }
        }

        let config = TrackerConfig::default();
        let pipeline = Pipeline::new(bundled_reference(), &config).unwrap();
        let mut source = ScriptedSource::new(&[(Side::Mine, "Pikachu"), (Side::Rival, "Mew")]);

        assert!(pipeline.run_tick(&mut source, &mut ClosedSink, &config).is_err());
        assert_eq!(source.calls.len(), 1);
    }
}
