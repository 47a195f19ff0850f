use flagbind::Flags;

mod reexport {
    pub use flagbind as cli;
}

/// Verifies that `#[flag(crate = "...")]` routes generated paths through
/// the given alias.
#[derive(Flags, Default)]
#[flag(crate = "reexport::cli")]
struct Aliased {
    #[flag("--value=V")]
    value: String,
}

fn main() {
    let mut options = Aliased::default();
    let _ = flagbind::try_register_new("aliased", &mut options);
}
