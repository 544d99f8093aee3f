use crate::assignment::assigner::find_best_agent;
use crate::models::agent::Agent;
use crate::models::candidate::Candidate;
use crate::models::job::Job;

/// Incremental assignment over a batch of new jobs.
///
/// Each assigned job is appended to the working snapshot, so later jobs in the
/// same batch see the load created by earlier ones. Jobs that already carry an
/// agent are recorded but never reassigned.
pub struct BatchAssigner<'a> {
    agents: &'a [Agent],
    candidates: &'a [Candidate],
    jobs: Vec<Job>,
}

impl<'a> BatchAssigner<'a> {
    pub fn new(agents: &'a [Agent], existing_jobs: Vec<Job>, candidates: &'a [Candidate]) -> Self {
        Self {
            agents,
            candidates,
            jobs: existing_jobs,
        }
    }

    /// Assigns `job` in place and returns the chosen agent, if any.
    pub fn assign(&mut self, job: &mut Job) -> Option<&'a Agent> {
        if job.assigned_agent.is_some() {
            self.jobs.push(job.clone());
            return None;
        }

        let chosen = find_best_agent(job, self.agents, &self.jobs, self.candidates);
        if let Some(agent) = chosen {
            job.assigned_agent = Some(agent.id);
        }
        self.jobs.push(job.clone());
        chosen
    }

    /// The working snapshot, including every job seen so far.
    pub fn snapshot(&self) -> &[Job] {
        &self.jobs
    }
}
