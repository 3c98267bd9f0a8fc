//! Job execution interface.
//!
//! The pipeline hands jobs to an executor one at a time and waits for each
//! to finish before building the next, so a stage can rely on the files its
//! predecessors wrote.

use crate::build::{ExecuteError, JobDescriptor};

/// Runs jobs synchronously, to completion.
pub trait JobExecutor {
    /// Execute one job. Returns once the job's output is in place.
    fn execute(&mut self, job: &JobDescriptor) -> Result<(), ExecuteError>;
}

impl<E: JobExecutor + ?Sized> JobExecutor for &mut E {
    fn execute(&mut self, job: &JobDescriptor) -> Result<(), ExecuteError> {
        (**self).execute(job)
    }
}

/// Executor that only records the jobs it is given.
///
/// Used for dry runs and planning; it never touches the filesystem.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    jobs: Vec<JobDescriptor>,
}

impl RecordingExecutor {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self { jobs: vec![] }
    }

    /// Jobs recorded so far, in execution order.
    pub fn jobs(&self) -> &[JobDescriptor] {
        &self.jobs
    }

    /// Take the recorded jobs, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<JobDescriptor> {
        std::mem::take(&mut self.jobs)
    }
}

impl JobExecutor for RecordingExecutor {
    fn execute(&mut self, job: &JobDescriptor) -> Result<(), ExecuteError> {
        self.jobs.push(job.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{JobSource, OptionBag, Stage};
    use std::path::PathBuf;

    fn job(target: &str) -> JobDescriptor {
        JobDescriptor::new(
            Stage::Concat,
            target.to_string(),
            JobSource::Files(vec![]),
            PathBuf::from("out.css"),
            OptionBag::new(),
        )
    }

    #[test]
    fn test_recording_executor_keeps_order() {
        let mut exec = RecordingExecutor::new();
        exec.execute(&job("a_000000")).unwrap();
        exec.execute(&job("a_000001")).unwrap();

        let ids: Vec<String> = exec.jobs().iter().map(|j| j.id()).collect();
        assert_eq!(ids, vec!["concat:a_000000", "concat:a_000001"]);
    }

    #[test]
    fn test_recording_executor_take() {
        let mut exec = RecordingExecutor::new();
        exec.execute(&job("a_000000")).unwrap();
        assert_eq!(exec.take().len(), 1);
        assert!(exec.jobs().is_empty());
    }

    #[test]
    fn test_executor_through_mut_ref() {
        fn run_one(mut executor: impl JobExecutor) {
            executor.execute(&job("a_000000")).unwrap();
        }

        let mut exec = RecordingExecutor::new();
        run_one(&mut exec);
        run_one(&mut exec);
        assert_eq!(exec.jobs().len(), 2);
    }
}
