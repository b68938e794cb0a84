mod models;
mod os_signal_termination;
mod result;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use log::error;
use log::info;
use log::LevelFilter;
use marrow_core::branching::BranchingStrategy;
use marrow_core::branching::TieBreaking;
use marrow_core::branching::ValueSelectionStrategy;
use marrow_core::branching::VariableSelectionStrategy;
use marrow_core::convert_case::Case;
use marrow_core::search::termination::Combinator;
use marrow_core::search::Backtracking;
use marrow_core::search::BranchAndBound;
use marrow_core::search::Dfs;
use marrow_core::search::OptimisationDirection;
use marrow_core::search::Outcome;
use marrow_core::search::ParallelDfs;
use marrow_core::search::RestartSearch;
use marrow_core::search::SearchEngine;
use marrow_core::search::SearchOptions;
use marrow_core::search::WorkerPool;
use marrow_core::sequence_generators::SequenceGeneratorType;
use marrow_core::statistics::configure_statistic_logging;
use marrow_core::Space;
use models::Model;
use models::ModelKind;
use result::MarrowError;
use result::MarrowResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The model to solve.
    #[command(subcommand)]
    model: ModelKind,

    /// The search engine.
    ///
    /// - "dfs" explores the search tree depth-first on the calling thread
    /// - "bab" is a best-first branch and bound which minimises the objective of the model
    /// - "restart" repeats depth-first runs with a node limit following the restart sequence;
    ///   for a model with an objective it restarts after every solution with a tighter bound
    /// - "parallel" is a depth-first search shared by "--threads" worker threads
    #[arg(long, value_enum, default_value_t, verbatim_doc_comment)]
    engine: EngineType,

    /// How the depth-first searches return to earlier nodes.
    #[arg(long, value_enum, default_value_t)]
    backtracking: Backtracking,

    /// Which unfixed variable is branched on next.
    #[arg(long, value_enum, default_value_t)]
    variable_selection: VariableSelectionStrategy,

    /// How the domain of the selected variable is split.
    #[arg(long, value_enum, default_value_t)]
    value_selection: ValueSelectionStrategy,

    /// How ties between equally good variables are broken.
    #[arg(long, value_enum, default_value_t)]
    tie_breaking: TieBreaking,

    /// Prefer the value a variable had in the last solution. Mostly useful in combination with
    /// the restart engine.
    #[arg(long)]
    last_value: bool,

    /// The maximum number of nodes to expand.
    ///
    /// Possible values: u64 (Optional)
    #[arg(long = "node-limit", verbatim_doc_comment)]
    node_limit: Option<u64>,

    /// The maximum number of failed nodes.
    ///
    /// Possible values: u64 (Optional)
    #[arg(long = "fail-limit", verbatim_doc_comment)]
    fail_limit: Option<u64>,

    /// The time budget for the search, given in milliseconds.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The number of solutions after which the search stops.
    ///
    /// Without this option a satisfaction problem stops after the first solution unless
    /// "--all-solutions" is given, and an optimisation problem searches until the optimum is proven.
    ///
    /// Possible values: usize (Optional)
    #[arg(long = "solution-limit", verbatim_doc_comment)]
    solution_limit: Option<usize>,

    /// Report all solutions in the case of satisfaction problems, or every improving solution in
    /// the case of optimisation problems.
    ///
    /// Possible values: bool
    #[arg(short = 'a', long = "all-solutions", verbatim_doc_comment)]
    all_solutions: bool,

    /// The number of worker threads of the parallel engine.
    ///
    /// Possible values: usize
    #[arg(long, default_value_t = 4, verbatim_doc_comment)]
    threads: usize,

    /// Fail instead of searching on the calling thread when no worker thread can be started.
    ///
    /// Possible values: bool
    #[arg(long, verbatim_doc_comment)]
    require_threads: bool,

    /// Decides the sequence of node limits of the runs of the restart engine.
    ///
    /// - The "constant" approach uses the same node limit for every run
    /// - The "geometric" approach uses a geometrically increasing sequence
    /// - The "luby" approach uses a recursive sequence of the form 1, 1, 2, 1, 1, 2, 4, 1, 1, 2,
    ///   1, 1, 2, 4, 8, 1, 1, 2.... (see "Optimal speedup of Las Vegas algorithms - Luby et al.
    ///   (1993)")
    ///
    /// To be used in combination with "--restart-base".
    #[arg(long, value_enum, default_value_t, verbatim_doc_comment)]
    restart_sequence: SequenceGeneratorType,

    /// The base node limit, used as a multiplier to the restart sequence.
    ///
    /// Possible values: i64
    #[arg(long, default_value_t = 100, verbatim_doc_comment)]
    restart_base: i64,

    /// The coefficient in the geometric sequence `x_i = x_{i-1} * "--restart-geometric-coef"`
    /// where `x_1 = "--restart-base"`. Used only if "--restart-sequence" is "geometric".
    ///
    /// Possible values: f64
    #[arg(
        long = "restart-geometric-coef",
        default_value_t = 1.5,
        verbatim_doc_comment
    )]
    restart_geometric_coef: f64,

    /// The random seed to use for the random heuristics.
    ///
    /// Possible values: u64
    #[arg(
        short = 'r',
        long = "random-seed",
        default_value_t = 42,
        verbatim_doc_comment
    )]
    random_seed: u64,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,

    /// If `--verbose` is enabled then this option removes the timestamp information from the log
    /// messages.
    ///
    /// Possible values: bool
    #[arg(long = "omit-timestamp", verbatim_doc_comment)]
    omit_timestamp: bool,

    /// If `--verbose` is enabled then this option removes the call site information from the log
    /// messages. The call site is the file and line from which the message originated.
    ///
    /// Possible values: bool
    #[arg(long = "omit-call-site", default_value_t = false, verbatim_doc_comment)]
    omit_call_site: bool,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EngineType {
    #[default]
    Dfs,
    Bab,
    Restart,
    Parallel,
}

fn configure_logging(
    verbose: bool,
    log_statistics: bool,
    omit_timestamp: bool,
    omit_call_site: bool,
) {
    if log_statistics {
        configure_statistic_logging(
            "%%%mzn-stat:",
            Some("%%%mzn-stat-end"),
            Some(Case::Camel),
            None,
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;
            if !omit_timestamp {
                write!(buf, "{} ", buf.timestamp())?;
            }
            write!(buf, "{} ", record.level())?;
            if !omit_call_site {
                write!(
                    buf,
                    "[{}:{}] ",
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0)
                )?;
            }

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> MarrowResult<()> {
    let args = Args::parse();

    configure_logging(
        args.verbose,
        args.log_statistics,
        args.omit_timestamp,
        args.omit_call_site,
    );

    let mut model = args.model.build(Space::with_seed(args.random_seed))?;
    let strategy = BranchingStrategy {
        variable_selection: args.variable_selection,
        value_selection: args.value_selection,
        tie_breaking: args.tie_breaking,
        last_value: args.last_value,
        seed: args.random_seed,
    };
    let brancher = strategy.create_brancher(&model.decision_variables);
    model.space.add_brancher(brancher);

    let is_optimisation = model.objective.is_some()
        && matches!(args.engine, EngineType::Bab | EngineType::Restart);
    let solution_limit = match args.solution_limit {
        Some(limit) => Some(limit),
        None if args.all_solutions || is_optimisation => None,
        None => Some(1),
    };
    let options = SearchOptions {
        node_limit: args.node_limit,
        fail_limit: args.fail_limit,
        time_limit: args.time_limit.map(Duration::from_millis),
        solution_limit,
        backtracking: args.backtracking,
        threads: args.threads,
        restart_sequence: args.restart_sequence,
        restart_base: args.restart_base,
        restart_geometric_factor: args.restart_geometric_coef,
    };

    let mut termination = Combinator::new(os_signal_termination::install()?, options.termination());
    let root = model.space.clone();

    let outcome = match args.engine {
        EngineType::Dfs => Dfs::new(&options).search(root, &mut termination),
        EngineType::Bab => {
            let objective = model.objective.ok_or(MarrowError::MissingObjective { engine: "bab" })?;
            BranchAndBound::new(OptimisationDirection::Minimise, objective, &options)
                .search(root, &mut termination)
        }
        EngineType::Restart => {
            let restart = RestartSearch::new(&options);
            let mut restart = match model.objective {
                Some(objective) => restart.minimising(objective),
                None => restart,
            };
            restart.search(root, &mut termination)
        }
        EngineType::Parallel => {
            let mut pool = if args.require_threads {
                WorkerPool::start(options.threads)?
            } else {
                WorkerPool::new(options.threads)
            };
            let outcome = ParallelDfs::new(&pool, &options).search(root, &mut termination);
            pool.shutdown();
            outcome
        }
    };

    print_outcome(&model, &outcome, args.all_solutions, is_optimisation);
    Ok(())
}

/// Print the outcome in the output format of MiniZinc.
fn print_outcome(model: &Model, outcome: &Outcome, all_solutions: bool, is_optimisation: bool) {
    let printed = if is_optimisation && !all_solutions {
        outcome
            .solutions
            .last()
            .map(std::slice::from_ref)
            .unwrap_or_default()
    } else {
        &outcome.solutions[..]
    };

    for solution in printed {
        print!("{}", model.format_solution(solution));
        println!("----------");
    }

    if outcome.is_infeasible() {
        println!("=====UNSATISFIABLE=====");
    } else if outcome.solutions.is_empty() {
        println!("=====UNKNOWN=====");
    } else if !outcome.incomplete {
        println!("==========");
    }
}
