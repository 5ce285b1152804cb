//! Process/run orchestration.

use crate::EngineConfig;
use rio_canon::Normalizer;
use rio_diagnostic::Diagnostic;
use rio_eval::{stdout_handler, EvalResult, NativeEntry, Natives, Runner, SharedPrintHandler};
use rio_ir::{Module, NativeId};
use rio_lexer::Lexer;
use rio_parse::Parser;
use rio_resolve::Resolver;
use rio_types::Typer;

/// Reusable pipeline state. See the crate docs for the stage order.
pub struct Engine {
    config: EngineConfig,
    lexer: Lexer,
    parser: Parser,
    normalizer: Normalizer,
    resolver: Resolver,
    typer: Typer,
    runner: Runner,
    natives: Natives,
    print: SharedPrintHandler,
    diagnostics: Vec<Diagnostic>,
    rounds: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with the default configuration, the builtin natives and
    /// output to stdout.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            config,
            lexer: Lexer::new(),
            parser: Parser::new(),
            normalizer: Normalizer::new(),
            resolver: Resolver::new(),
            typer: Typer::new(),
            runner: Runner::new().with_max_call_depth(config.max_call_depth),
            natives: Natives::with_builtins(),
            print: stdout_handler(),
            diagnostics: Vec::new(),
            rounds: 0,
        }
    }

    /// Send `log` output to `print` instead of stdout.
    #[must_use]
    pub fn with_print_handler(mut self, print: SharedPrintHandler) -> Self {
        self.print = print;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Add a host function. It is seeded into every module processed
    /// afterwards: into `core` when its owner is `Idx::NONE`, otherwise
    /// into the owner type's method table.
    pub fn register_native(&mut self, entry: NativeEntry) -> NativeId {
        self.natives.register(entry)
    }

    /// Lex, parse, normalize, seed builtins and analyze `source` into a
    /// new module.
    pub fn process(&mut self, source: &str) -> Module {
        let mut module = Module::new();
        self.process_into(source, &mut module);
        module
    }

    /// Like [`process`](Self::process), but clears and refills `module`
    /// so its arenas are reused.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn process_into(&mut self, source: &str, module: &mut Module) {
        module.clear();
        self.diagnostics.clear();

        let tokens = self.lexer.lex(source);
        let tree = self.parser.parse(tokens);
        self.normalizer.norm(tree, source, module);
        self.natives.seed(module);
        self.rounds = self.analyze(module);

        self.diagnostics.extend_from_slice(self.parser.diagnostics());
        self.diagnostics
            .extend_from_slice(self.normalizer.diagnostics());
        self.diagnostics.extend_from_slice(self.resolver.diagnostics());
        self.diagnostics.extend_from_slice(self.typer.diagnostics());
        tracing::debug!(
            rounds = self.rounds,
            diagnostics = self.diagnostics.len(),
            "processed"
        );
    }

    /// Alternate resolution and typing until a round changes nothing or
    /// the configured bound is hit. Returns the rounds run.
    fn analyze(&mut self, module: &mut Module) -> usize {
        for round in 1..=self.config.analysis_rounds {
            let changes = self.analyze_once(module);
            tracing::debug!(round, changes, "analysis round");
            if changes == 0 {
                return round;
            }
        }
        self.config.analysis_rounds
    }

    /// One resolve round followed by one type round; returns the nodes
    /// changed. Zero on a module that has already converged.
    pub fn analyze_once(&mut self, module: &mut Module) -> usize {
        self.resolver.resolve(module) + self.typer.type_module(module)
    }

    /// Run `main` of a processed module.
    pub fn run(&mut self, module: &Module) -> EvalResult {
        self.runner.set_max_call_depth(self.config.max_call_depth);
        self.runner.run(module, &self.natives, &self.print)
    }

    /// Problems found by the last `process`, in stage order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Analysis rounds the last `process` ran.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}
