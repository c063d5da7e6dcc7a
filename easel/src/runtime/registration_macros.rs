/// Lists program modules for the launcher. Each module exposes a
/// `SKETCH_CONFIG` static and an `init()` constructor; the result is a
/// `Result<SketchRegistry>` that fails on duplicate names.
///
/// ```ignore
/// let registry = easel::register_sketches![bouncer, painter]?;
/// ```
#[macro_export]
macro_rules! register_sketches {
    ($($module:ident),+ $(,)?) => {
        $crate::runtime::registry::SketchRegistry::from_entries(vec![
            $(
                $crate::runtime::registry::SketchEntry::new(
                    &$module::SKETCH_CONFIG,
                    || -> ::std::boxed::Box<dyn $crate::runtime::sketch::Sketch> {
                        ::std::boxed::Box::new($module::init())
                    },
                ),
            )+
        ])
    };
}
