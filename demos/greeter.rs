use command_line::{OptionSpec, Outcome, PositionalSpec, Registry, RegistryError, ValueType};

fn main() -> Result<(), RegistryError> {
    let mut registry = Registry::new("greeter");
    registry
        .about("Greets each person, optionally several times.")?
        .register_option(OptionSpec::flag("verbose", Some('v')).help("Print more."))?
        .register_option(
            OptionSpec::single("greeting", Some('g'), ValueType::String)
                .default("Hello")
                .help("How to greet."),
        )?
        .register_option(
            OptionSpec::single("count", Some('c'), ValueType::Integer)
                .default(1i64)
                .help("How many times to greet."),
        )?
        .register_positional(
            PositionalSpec::new("name", ValueType::String)
                .variadic()
                .help("Who to greet."),
        )?;
    let parser = registry.freeze().parser().abbreviations(true);

    let result = match parser.parse_env() {
        Ok(Outcome::Parsed(result)) => result,
        Ok(Outcome::Help(message)) => {
            println!("{message}");
            return Ok(());
        }
        Err(error) => {
            let tokens: Vec<String> = std::env::args().skip(1).collect();
            eprintln!("{error}");
            eprintln!("{}", error.context(&tokens));
            std::process::exit(1);
        }
    };

    let greeting = result.string("greeting").unwrap_or("Hello");
    let count = result.integer("count").unwrap_or(1);

    if result.boolean("verbose") == Some(true) {
        println!("Greeting {} name(s), {count} time(s).", result.values("name").len());
    }

    for name in result.values("name") {
        for _ in 0..count {
            println!("{greeting}, {name}!");
        }
    }

    Ok(())
}
