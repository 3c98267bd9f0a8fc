//! Build pipeline orchestration.
//!
//! For each target the pipeline resolves options once, then walks the file
//! groups and emits a linear chain of jobs per group:
//!
//! ```text
//! less/sass (one per preprocessed source) -> concat -> cssmin (optional)
//! ```
//!
//! Jobs are handed to a [`JobExecutor`] in emission order. Each job has
//! finished by the time the next is built, so the preprocessor outputs exist
//! when concatenation reads them.

use std::path::PathBuf;
use std::time::Instant;

use crate::build::dest::{clean_dest, minified_dest, nest_under, preprocessed_dest};
use crate::build::{
    classify, resolve, BuildContext, BuildError, BuildPlan, BuildResult, BuildTarget,
    EngineExecutor, FileGroup, JobDescriptor, JobExecutor, JobSource, RecordingExecutor,
    ResolvedOptions, SequentialNamer, Stage, TargetNamer, TargetResult,
};

/// Builds and runs the job chain of a single target invocation.
pub struct PipelineBuilder<'a, N: TargetNamer, E: JobExecutor> {
    target: &'a str,
    options: &'a ResolvedOptions,
    namer: N,
    executor: E,
    submitted: Vec<JobDescriptor>,
    outputs: Vec<PathBuf>,
}

impl<'a, N: TargetNamer, E: JobExecutor> PipelineBuilder<'a, N, E> {
    /// Create a builder for `target` running with `options`.
    pub fn new(target: &'a str, options: &'a ResolvedOptions, namer: N, executor: E) -> Self {
        Self { target, options, namer, executor, submitted: vec![], outputs: vec![] }
    }

    /// Build every file group in order.
    ///
    /// Stops at the first error. Jobs that already ran stay run.
    pub fn build(&mut self, groups: &[FileGroup]) -> Result<(), BuildError> {
        for group in groups {
            self.build_group(group)?;
        }
        tracing::info!("queued tasks: {}", self.job_ids().join(", "));
        Ok(())
    }

    /// Plan one file group and run its jobs.
    pub fn build_group(&mut self, group: &FileGroup) -> Result<(), BuildError> {
        let jobs = self.plan_group(group)?;
        for job in jobs {
            self.submit(job)?;
        }

        if self.options.keep_clean_output() {
            self.outputs.push(clean_dest(&group.dest));
        }
        if self.options.minify() {
            self.outputs.push(minified_dest(&group.dest));
        }
        Ok(())
    }

    /// Compute the job chain of one file group without running it.
    ///
    /// Every source is classified before any descriptor is built, so an
    /// unsupported source fails the group before any of its jobs run.
    pub fn plan_group(&mut self, group: &FileGroup) -> Result<Vec<JobDescriptor>, BuildError> {
        let classified = group
            .sources
            .iter()
            .map(|src| {
                let resolved = group.resolve_source(src);
                classify(&resolved).map(|kind| (resolved, kind))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let temp_dir = self.options.temp_dir();
        let mut jobs = Vec::new();
        let mut concat_inputs = Vec::with_capacity(classified.len());

        for (source, kind) in classified {
            match kind.stage() {
                None => concat_inputs.push(source),
                Some(stage) => {
                    let dest = preprocessed_dest(temp_dir, &source);
                    jobs.push(self.job(stage, JobSource::File(source), dest.clone()));
                    concat_inputs.push(dest);
                }
            }
        }

        let concat_dest = if self.options.keep_clean_output() {
            clean_dest(&group.dest)
        } else {
            nest_under(temp_dir, &group.dest)
        };
        jobs.push(self.job(Stage::Concat, JobSource::Files(concat_inputs), concat_dest.clone()));

        if self.options.minify() {
            let min_dest = minified_dest(&group.dest);
            jobs.push(self.job(Stage::Cssmin, JobSource::File(concat_dest), min_dest));
        }

        Ok(jobs)
    }

    /// Jobs run so far, in order.
    pub fn submitted(&self) -> &[JobDescriptor] {
        &self.submitted
    }

    /// Ids of the jobs run so far, in order.
    pub fn job_ids(&self) -> Vec<String> {
        self.submitted.iter().map(JobDescriptor::id).collect()
    }

    /// Final artifacts of the groups built so far.
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    /// Consume the builder, returning the jobs run.
    pub fn into_jobs(self) -> Vec<JobDescriptor> {
        self.submitted
    }

    fn job(&mut self, stage: Stage, src: JobSource, dest: PathBuf) -> JobDescriptor {
        let target = self.namer.make_unique(self.target);
        let options = self.options.stage_options(stage).clone();
        JobDescriptor::new(stage, target, src, dest, options)
    }

    fn submit(&mut self, job: JobDescriptor) -> Result<(), BuildError> {
        tracing::debug!("+ {} [{} -> {}]", job.id(), job.src, job.dest.display());
        self.executor
            .execute(&job)
            .map_err(|source| BuildError::Job { job: job.id(), source })?;
        self.submitted.push(job);
        Ok(())
    }
}

/// Build one target's file groups with a fresh sequential namer.
///
/// Returns the jobs run, in order.
pub fn build_target<E: JobExecutor>(
    name: &str,
    groups: &[FileGroup],
    options: &ResolvedOptions,
    executor: E,
) -> Result<Vec<JobDescriptor>, BuildError> {
    let mut builder = PipelineBuilder::new(name, options, SequentialNamer::new(), executor);
    builder.build(groups)?;
    Ok(builder.into_jobs())
}

/// Build pipeline for executing builds.
pub struct BuildPipeline {
    /// Build context
    context: BuildContext,
    /// Whether to stop on first failed target
    fail_fast: bool,
    /// Whether to do a dry run (plan jobs without running them)
    dry_run: bool,
}

impl BuildPipeline {
    /// Create a new build pipeline.
    pub fn new(context: BuildContext) -> Self {
        Self { context, fail_fast: false, dry_run: false }
    }

    /// Set fail-fast mode (stop on first failed target).
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set dry-run mode (plan jobs without running them).
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the build pipeline.
    ///
    /// Dry runs record jobs without touching the filesystem; real runs use
    /// the built-in engines and the configured tools.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        if self.dry_run {
            self.build_with(&mut RecordingExecutor::new())
        } else {
            self.build_with(&mut EngineExecutor::new(self.context.config().tools.clone()))
        }
    }

    /// Run the build pipeline with a given executor.
    ///
    /// Unsupported sources, invalid options and configuration problems abort
    /// the whole run. A failing job only fails its target; later targets
    /// still run unless fail-fast is set.
    pub fn build_with<E: JobExecutor>(&self, executor: &mut E) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let plan = self.context.create_plan()?;
        let mut result = self.execute_plan(&plan, executor)?;
        result.total_duration = start.elapsed();
        Ok(result)
    }

    fn execute_plan<E: JobExecutor>(
        &self,
        plan: &BuildPlan,
        executor: &mut E,
    ) -> Result<BuildResult, BuildError> {
        let mut result = BuildResult::new();

        tracing::debug!("Build plan: {} targets", plan.len());
        for target in plan.targets() {
            let target_result = self.execute_target(target, executor)?;
            let failed = target_result.status.is_failure();
            result.add_result(target_result);

            if failed && self.fail_fast {
                break;
            }
        }

        Ok(result)
    }

    fn execute_target<E: JobExecutor>(
        &self,
        target: &BuildTarget,
        executor: &mut E,
    ) -> Result<TargetResult, BuildError> {
        let start = Instant::now();
        let _span = tracing::info_span!("target", name = %target.name).entered();

        let options = resolve(&self.context.target_options(&target.name)?)?;
        let mut builder =
            PipelineBuilder::new(&target.name, &options, SequentialNamer::new(), &mut *executor);

        match builder.build(&target.files) {
            Ok(()) => {
                let jobs = builder.job_ids();
                let outputs = builder.outputs().to_vec();
                if self.dry_run {
                    Ok(TargetResult::planned(target.name.clone(), jobs, outputs))
                } else {
                    Ok(TargetResult::success(target.name.clone(), jobs, outputs, start.elapsed()))
                }
            }
            Err(err @ BuildError::Job { .. }) => {
                tracing::error!("{}", err);
                Ok(TargetResult::failed(
                    target.name.clone(),
                    err.to_string(),
                    builder.job_ids(),
                    start.elapsed(),
                ))
            }
            Err(err) => Err(err),
        }
    }
}
