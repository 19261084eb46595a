//! Orchestration of a whole generation run

use crate::discovery::identify_files;
use crate::error::GenerationError;
use crate::shim::write_entity_macros;
use crate::unit::CodeGenUnit;
use headergen_core::{LogLevel, Logger, Settings};
use headergen_parser::FileParser;
use headergen_runtime::{TaskHandle, ThreadPool, ThreadPoolConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of [`CodeGenManager::run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Every file was processed successfully and setup did not fail
    pub completed: bool,
    pub duration: Duration,
    /// Files parsed and generated successfully
    pub parsed_files: Vec<PathBuf>,
    /// Files skipped because their generated files are newer
    pub up_to_date_files: Vec<PathBuf>,
    pub failed_files: Vec<PathBuf>,
}

impl std::fmt::Display for RunResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} file(s) generated, {} up to date, {} failed in {:.3}s",
            self.parsed_files.len(),
            self.up_to_date_files.len(),
            self.failed_files.len(),
            self.duration.as_secs_f64()
        )?;
        if !self.completed {
            write!(f, " (incomplete)")?;
        }
        Ok(())
    }
}

/// Identifies the files to process and runs parsing and generation on each
/// of them, on a worker pool when more than one thread is configured.
pub struct CodeGenManager {
    settings: Arc<Settings>,
    logger: Option<Arc<dyn Logger>>,
}

impl std::fmt::Debug for CodeGenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeGenManager")
            .field("thread_count", &self.settings.manager.thread_count)
            .field("has_logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

impl CodeGenManager {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Files the next run considers, up-to-date ones included
    pub fn identify_files(&self) -> Vec<PathBuf> {
        identify_files(&self.settings.manager)
    }

    /// Parse and generate every stale file, or every file when
    /// `force_regenerate_all` is set.
    ///
    /// `file_parser` and `code_gen_unit` are used directly when running on a
    /// single thread, and cloned once per file otherwise.
    pub fn run<U>(
        &self,
        file_parser: &FileParser,
        code_gen_unit: &mut U,
        force_regenerate_all: bool,
    ) -> RunResult
    where
        U: CodeGenUnit + Clone + 'static,
    {
        let start = Instant::now();
        let mut run = RunResult::default();

        if let Err(e) = self.prepare(code_gen_unit) {
            tracing::error!(error = %e, "Generation run aborted");
            self.log(LogLevel::Error, &e.to_string());
            run.duration = start.elapsed();
            return run;
        }

        let files = self.identify_files();
        let (to_process, up_to_date): (Vec<PathBuf>, Vec<PathBuf>) = if force_regenerate_all {
            (files, Vec::new())
        } else {
            files
                .into_iter()
                .partition(|path| !code_gen_unit.is_up_to_date(path))
        };
        for path in &up_to_date {
            tracing::debug!(file = %path.display(), "Up to date");
        }
        run.up_to_date_files = up_to_date;

        let thread_count = self
            .settings
            .manager
            .effective_thread_count()
            .min(to_process.len())
            .max(1);

        let outcomes = if thread_count == 1 {
            Self::process_sequentially(file_parser, code_gen_unit, to_process)
        } else {
            self.process_in_parallel(file_parser, code_gen_unit, to_process, thread_count)
        };

        for (path, succeeded) in outcomes {
            if succeeded {
                run.parsed_files.push(path);
            } else {
                run.failed_files.push(path);
            }
        }

        run.completed = run.failed_files.is_empty();
        run.duration = start.elapsed();

        tracing::info!(
            generated = run.parsed_files.len(),
            up_to_date = run.up_to_date_files.len(),
            failed = run.failed_files.len(),
            completed = run.completed,
            "Generation run finished"
        );
        self.log(
            if run.completed { LogLevel::Info } else { LogLevel::Error },
            &run.to_string(),
        );
        run
    }

    /// Checks fatal for the whole run, done before touching any file
    fn prepare<U: CodeGenUnit>(&self, code_gen_unit: &U) -> Result<(), GenerationError> {
        code_gen_unit.prepare_output()?;
        write_entity_macros(code_gen_unit.settings())?;
        Ok(())
    }

    fn process_sequentially<U: CodeGenUnit>(
        file_parser: &FileParser,
        code_gen_unit: &mut U,
        files: Vec<PathBuf>,
    ) -> Vec<(PathBuf, bool)> {
        files
            .into_iter()
            .map(|path| {
                let succeeded = process_file(file_parser, code_gen_unit, &path);
                (path, succeeded)
            })
            .collect()
    }

    fn process_in_parallel<U>(
        &self,
        file_parser: &FileParser,
        code_gen_unit: &U,
        files: Vec<PathBuf>,
        thread_count: usize,
    ) -> Vec<(PathBuf, bool)>
    where
        U: CodeGenUnit + Clone + 'static,
    {
        let config = ThreadPoolConfig::new()
            .with_thread_count(thread_count)
            .paused();
        let pool = match ThreadPool::new(config) {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(error = %e, "Could not start worker pool, processing sequentially");
                let mut code_gen_unit = code_gen_unit.clone();
                return Self::process_sequentially(file_parser, &mut code_gen_unit, files);
            }
        };

        // Publish every task before any worker starts
        let tasks: Vec<(PathBuf, TaskHandle<bool>)> = files
            .into_iter()
            .map(|path| {
                let file_parser = file_parser.clone();
                let mut code_gen_unit = code_gen_unit.clone();
                let task_path = path.clone();
                let handle =
                    pool.submit(move || process_file(&file_parser, &mut code_gen_unit, &task_path));
                (path, handle)
            })
            .collect();
        pool.set_is_running(true);

        tasks
            .into_iter()
            .map(|(path, handle)| match handle.join() {
                Ok(succeeded) => (path, succeeded),
                Err(e) => {
                    tracing::error!(file = %path.display(), error = %e, "Generation task did not complete");
                    self.log(
                        LogLevel::Error,
                        &format!("Generation of {} did not complete: {e}", path.display()),
                    );
                    (path, false)
                }
            })
            .collect()
    }

    fn log(&self, level: LogLevel, message: &str) {
        if let Some(logger) = &self.logger {
            logger.log(level, message);
        }
    }
}

/// Parse then generate one file, failures are reported by the parser and unit.
///
/// Every failure stays local to `path`: run-wide checks happen once in
/// [`CodeGenManager::run`] before any file is dispatched.
fn process_file<U: CodeGenUnit>(file_parser: &FileParser, code_gen_unit: &mut U, path: &Path) -> bool {
    let result = match file_parser.parse(path) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(file = %path.display(), error = %e, "Parsing failed");
            return false;
        }
    };

    match code_gen_unit.generate_code(&result) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(file = %path.display(), error = %e, "Generation failed");
            false
        }
    }
}
