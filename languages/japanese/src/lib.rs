pub mod script;
pub mod translator;

pub use script::ScriptFilter;
pub use translator::JapaneseTranslator;
