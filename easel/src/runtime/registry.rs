use super::sketch::{Sketch, SketchConfig};
use crate::core::error::{Error, Result};

/// Builds a fresh program instance for each launch.
pub type SketchFactory = fn() -> Box<dyn Sketch>;

/// A launchable program: its window settings and a constructor.
#[derive(Clone, Copy, Debug)]
pub struct SketchEntry {
    config: &'static SketchConfig,
    factory: SketchFactory,
}

impl SketchEntry {
    pub fn new(config: &'static SketchConfig, factory: SketchFactory) -> Self {
        Self { config, factory }
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn config(&self) -> &'static SketchConfig {
        self.config
    }

    pub fn instantiate(&self) -> Box<dyn Sketch> {
        (self.factory)()
    }
}

/// The launcher's program list, in the order it was declared.
#[derive(Debug, Default)]
pub struct SketchRegistry {
    entries: Vec<SketchEntry>,
}

impl SketchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the whole list if two entries share a name.
    pub fn from_entries(entries: Vec<SketchEntry>) -> Result<Self> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register(entry)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, entry: SketchEntry) -> Result<()> {
        if self.get(entry.name()).is_some() {
            return Err(Error::usage(format!(
                "Sketch '{}' is registered twice",
                entry.name()
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SketchEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// The named entry, or the first one when no name is given.
    pub fn resolve(&self, name: Option<&str>) -> Result<&SketchEntry> {
        match name {
            Some(name) => self
                .get(name)
                .ok_or_else(|| Error::usage(format!("Unknown sketch: {}", name))),
            None => self
                .entries
                .first()
                .ok_or_else(|| Error::usage("No sketches registered")),
        }
    }

    pub fn entries(&self) -> &[SketchEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(SketchEntry::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl Sketch for Blank {}

    fn blank() -> Box<dyn Sketch> {
        Box::new(Blank)
    }

    static CIRCLES: SketchConfig = SketchConfig {
        name: "circles",
        display_name: "Circles",
        steps_per_second: 30.0,
        w: 400,
        h: 400,
    };

    static LINES: SketchConfig = SketchConfig {
        name: "lines",
        display_name: "Lines",
        steps_per_second: 10.0,
        w: 200,
        h: 100,
    };

    #[test]
    fn keeps_declaration_order() {
        let registry = SketchRegistry::from_entries(vec![
            SketchEntry::new(&LINES, blank),
            SketchEntry::new(&CIRCLES, blank),
        ])
        .unwrap();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["lines", "circles"]);
        assert_eq!(registry.resolve(None).unwrap().name(), "lines");
        assert_eq!(registry.resolve(Some("circles")).unwrap().config().w, 400);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = SketchRegistry::from_entries(vec![
            SketchEntry::new(&CIRCLES, blank),
            SketchEntry::new(&CIRCLES, blank),
        ])
        .unwrap_err();
        assert!(err.is_usage());
        assert_eq!(err.to_string(), "Sketch 'circles' is registered twice");
    }

    #[test]
    fn resolve_reports_unknown_and_empty() {
        let empty = SketchRegistry::new();
        assert!(empty.is_empty());
        assert_eq!(
            empty.resolve(None).unwrap_err().to_string(),
            "No sketches registered"
        );

        let mut registry = SketchRegistry::new();
        registry.register(SketchEntry::new(&LINES, blank)).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve(Some("dots")).unwrap_err().to_string(),
            "Unknown sketch: dots"
        );
    }
}
