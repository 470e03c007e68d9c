//! Compiles a handful of SEREs and prints automaton statistics.
//!
//! Run with:
//! ```bash
//! cargo run --example sere -- --reduction brzozowski --minimize --dot
//! ```

use clap::Parser;
use log::info;

use sere_automata::ast::Expr;
use sere_automata::config::{AlgorithmPolicy, AutomataConfig, ReductionPolicy};
use sere_automata::label::LabelKind;
use sere_automata::manager::AutomataManager;
use sere_automata::sere::{RepeatOp, Sere};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Label synthesis policy: alphabet, transitions or heuristic.
    #[arg(long, value_name = "POLICY", default_value = "transitions")]
    algorithm: AlgorithmPolicy,

    /// Reduction used after composite operators: bisimulation or brzozowski.
    #[arg(long, value_name = "POLICY", default_value = "bisimulation")]
    reduction: ReductionPolicy,

    /// Label backend: bdd or hybrid.
    #[arg(long, value_name = "KIND", default_value = "bdd")]
    label_kind: LabelKind,

    /// Reduce intermediate automata while compiling.
    #[arg(long)]
    minimize: bool,

    /// Keep automata complete (adds a sink location).
    #[arg(long)]
    keep_complete: bool,

    /// Print each automaton in DOT format.
    #[arg(long)]
    dot: bool,
}

fn atom(name: &str) -> Sere {
    Sere::prop(Expr::atom(name))
}

fn builtin_seres() -> Vec<Sere> {
    vec![
        // {req ; busy[*] ; ack}
        Sere::concat(Sere::concat(atom("req"), Sere::star(atom("busy"))), atom("ack")),
        // {req ; [*] ; ack}
        Sere::concat(Sere::concat(atom("req"), Sere::Repeat(RepeatOp::Star, None)), atom("ack")),
        // {{a ; b}[+] : c}
        Sere::fusion(Sere::plus(Sere::bracket(Sere::concat(atom("a"), atom("b")))), atom("c")),
        // {a[*2] | b ; c}
        Sere::or(Sere::repeat(atom("a"), 2), Sere::concat(atom("b"), atom("c"))),
        // {{a ; b} & {c[*]}}
        Sere::non_length_matching_and(Sere::concat(atom("a"), atom("b")), Sere::star(atom("c"))),
        // {{a ; b ; c} && {!{a ; b ; c}}}
        Sere::length_matching_and(
            Sere::concat(Sere::concat(atom("a"), atom("b")), atom("c")),
            Sere::not(Sere::concat(Sere::concat(atom("a"), atom("b")), atom("c"))),
        ),
    ]
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mgr = AutomataManager::new(AutomataConfig {
        algorithm: args.algorithm,
        label_kind: args.label_kind,
        reduction: args.reduction,
        keep_complete: args.keep_complete,
        minimize_automaton: args.minimize,
        ..Default::default()
    });

    for sere in builtin_seres() {
        let time = std::time::Instant::now();
        let aut = mgr.create_from_sere(&sere)?;
        let reduced = mgr.nfa_reduction(&aut)?;
        info!("compiled {} in {:.3}s", sere, time.elapsed().as_secs_f64());

        println!("{}", sere);
        println!(
            "  compiled: {} locations, {} transitions ({} duplicate)",
            aut.location_count(),
            aut.transition_count(),
            aut.transitions_duplicate_count()
        );
        println!(
            "  reduced:  {} locations, {} transitions",
            reduced.location_count(),
            reduced.transition_count()
        );
        println!("  empty:    {}", mgr.emptiness(&reduced));
        if let Some(word) = reduced.shortest_word() {
            let letters: Vec<String> = word.iter().map(|l| l.to_string()).collect();
            println!("  witness:  [{}]", letters.join(", "));
        }
        if args.dot {
            println!("{}", reduced.to_dot()?);
        }
    }

    println!("labels = {:?}", mgr.labels());
    println!("\nAll done in {:.3}s", time_total.elapsed().as_secs_f64());
    Ok(())
}
