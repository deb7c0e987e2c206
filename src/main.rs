
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate hasm;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::path::Path;

use hasm::assembler;
use hasm::assembler::passes::Program;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tOutfile: {}\n\tInfile: {}",
        verbosity_filter(args.occurrences_of("verbose")),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("None")
    );

    // INPUT is required, so clap has already rejected a missing one.
    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());
    let opath = args.value_of("output").map(Path::new);

    let (program, written) = match assembler::passes::assemble_file(ipath, opath) {
        Err(err) => {
            error!("fatal: unable to assemble `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(result) => result,
    };
    info!("wrote {} word(s) to `{}`", program.words().len(), written.display());

    if args.is_present("print-debug") {
        print_listing(&program);
    }

    if args.is_present("symbols") {
        print_symbols(&program);
    }
}

/// Prints each instruction's ROM address, source and encoding.
fn print_listing(program: &Program) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for word in program.words() {
        grid.add(Cell::from(format!("0x{:04X}:", word.address)));
        grid.add(Cell::from(format!("{}", word.command)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(word.bits.clone()));
    }

    println!("{}", grid.fit_into_columns(4));
}

fn print_symbols(program: &Program) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(2),
        direction:   Direction::LeftToRight,
    });

    for (name, addr) in program.symbols().sorted() {
        grid.add(Cell::from(name.to_string()));
        grid.add(Cell::from(format!("{}", addr)));
    }

    println!("{}", grid.fit_into_columns(2));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input .asm file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile instead of the sibling .hack file"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("show")
            .takes_value(false)
            .help("prints each instruction alongside its encoding to STDOUT"))
        .arg(Arg::with_name("symbols")
            .short("s")
            .long("symbols")
            .takes_value(false)
            .help("prints the final symbol table to STDOUT"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity_filter(verbosity))
        .chain(std::io::stdout())
        .apply().ok();
}
