use polyglot_core::language;

pub fn run() {
    println!("Supported languages ({}):\n", language::languages().len());
    for lang in language::languages() {
        println!("  {:<4} {}", lang.code, lang.name);
    }
}
