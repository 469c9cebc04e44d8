/// Raw contents of a job-shop benchmark file.
///
/// No structural checks happen here beyond the row counts; widths and machine
/// ids are validated once the problem is turned into a scheduling instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JspLibProblem {
    // header
    pub jobs: usize,
    pub machines: usize,
    pub optimal_makespan: Option<u64>,
    // one row per job, in the job's own operation order
    pub processing_times: Vec<Vec<u64>>,
    // one row per job, 1-based machine ids
    pub machine_sequences: Vec<Vec<u64>>,
}
