// ============================================================================
// Job-Based Invalidation
// ============================================================================
//
// Widgets never call back into their host. They push deduplicated jobs here
// and the host drains them once per turn of its event loop.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::widgets::WidgetId;

/// Job types for invalidation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobType {
    /// Widget needs layout recalculation (and a repaint)
    Layout,
    /// Widget needs repaint only
    Paint,
    /// Widget has an active transition that needs advancement
    Animation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Job {
    pub widget_id: WidgetId,
    pub job_type: JobType,
}

thread_local! {
    static PENDING_JOBS: RefCell<HashSet<Job>> = RefCell::new(HashSet::new());
    static FRAME_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// Push a job to the queue.
/// Duplicate jobs (same widget_id + job_type) are ignored.
pub fn push_job(widget_id: WidgetId, job_type: JobType) {
    PENDING_JOBS.with_borrow_mut(|jobs| {
        jobs.insert(Job {
            widget_id,
            job_type,
        });
    });
    request_frame();
}

/// Drain all pending jobs
pub fn drain_pending_jobs() -> Vec<Job> {
    PENDING_JOBS.with_borrow_mut(|jobs| jobs.drain().collect())
}

/// Check whether `widget_id` has a pending job of `job_type` without draining.
pub fn has_job(widget_id: WidgetId, job_type: JobType) -> bool {
    PENDING_JOBS.with_borrow(|jobs| {
        jobs.contains(&Job {
            widget_id,
            job_type,
        })
    })
}

pub fn request_frame() {
    FRAME_REQUESTED.set(true);
}

/// Check if a frame has been requested and clear the flag
pub fn take_frame_request() -> bool {
    FRAME_REQUESTED.replace(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jobs_are_deduplicated() {
        let id = WidgetId::next();
        push_job(id, JobType::Layout);
        push_job(id, JobType::Layout);
        push_job(id, JobType::Paint);

        let jobs: Vec<_> = drain_pending_jobs()
            .into_iter()
            .filter(|j| j.widget_id == id)
            .collect();
        assert_eq!(jobs.len(), 2);
        assert!(!has_job(id, JobType::Layout));
    }

    #[test]
    fn test_push_requests_frame() {
        take_frame_request();
        push_job(WidgetId::next(), JobType::Paint);
        assert!(take_frame_request());
        assert!(!take_frame_request());
    }
}
