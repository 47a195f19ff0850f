use flagbind::{Flags, Value, ValueError, lookup, render_help};

#[derive(Default)]
struct Level(u8);

impl Value for Level {
    fn render(&self) -> String {
        self.0.to_string()
    }

    fn set(&mut self, input: &str) -> Result<(), ValueError> {
        self.0 = input.parse().map_err(ValueError::from_display)?;
        Ok(())
    }
}

#[derive(Flags, Default)]
struct Options<T: Default> {
    #[flag("--level=N how loud")]
    level: Level,
    r#type: String,
    #[flag("-")]
    extra: T,
    _private: std::marker::PhantomData<T>,
    #[flag(rest)]
    files: Vec<String>,
}

#[derive(Flags)]
struct Empty {}

fn main() {
    let options = Options::<i16>::default();
    let _ = render_help("demo", "FILE...", Some(&options));
    let _ = lookup(&options, "type");
    let _ = render_help("demo", "", Some(&Empty {}));
}
