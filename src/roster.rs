//! Roster State
//!
//! Everything the dashboard shows, plus the transitions that decide when a
//! page must be (re)fetched. Transitions that need the server return a
//! [`FetchTicket`]; only the response for the latest ticket is applied, so a
//! slow answer to an older query never overwrites a newer one.

use reactive_stores::Store;

use crate::api::{ApiClient, Transport};
use crate::config::PAGE_SIZE;
use crate::error::ApiError;
use crate::models::{ListFilter, Student, StudentStatus};
use crate::student_form::{SaveOutcome, StudentForm};

const LOAD_FAILED: &str = "Failed to load students";
const DELETE_FAILED: &str = "Failed to delete student";

/// Page, status filter and search text
#[derive(Debug, Clone, PartialEq)]
pub struct RosterQuery {
    /// 1-based
    pub page: u32,
    pub status: Option<StudentStatus>,
    pub search: String,
}

impl Default for RosterQuery {
    fn default() -> Self {
        Self {
            page: 1,
            status: None,
            search: String::new(),
        }
    }
}

impl RosterQuery {
    /// Filters with empty values dropped
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            status: self.status,
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
        }
    }
}

/// One issued list request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub page: u32,
    pub filter: ListFilter,
}

/// Which form the student modal is showing
#[derive(Debug, Clone, PartialEq)]
pub enum Editor {
    Create,
    Edit(Student),
}

impl Editor {
    pub fn student(&self) -> Option<&Student> {
        match self {
            Editor::Create => None,
            Editor::Edit(student) => Some(student),
        }
    }

    pub fn initial_form(&self) -> StudentForm {
        self.student().map(StudentForm::from_student).unwrap_or_default()
    }

    /// Server GPA to show next to the preview; zero counts as none.
    pub fn backend_gpa(&self) -> Option<f64> {
        self.student()
            .and_then(|s| s.grade_point_average)
            .filter(|gpa| *gpa != 0.0)
    }
}

/// What a finished save means for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFinish {
    /// Answer for the modal that asked. Only set when that modal is still
    /// open and the save failed; a success closes it instead.
    pub reply: Option<SaveOutcome>,
    pub refetch: Option<FetchTicket>,
}

/// Summary cards, computed from the rows on screen
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStats {
    pub total: usize,
    pub scholarship: usize,
    /// Mean GPA with missing values counted as zero; "0" for no rows
    pub average_performance: String,
}

impl RosterStats {
    pub fn from_students(students: &[Student]) -> Self {
        let total = students.len();
        let scholarship = students.iter().filter(|s| s.is_scholarship).count();
        let average_performance = if total == 0 {
            "0".to_string()
        } else {
            let sum: f64 = students.iter().map(|s| s.grade_point_average.unwrap_or(0.0)).sum();
            format!("{:.1}", sum / total as f64)
        };
        Self {
            total,
            scholarship,
            average_performance,
        }
    }
}

/// A short page means there is nothing after it.
pub fn has_next_page(rows: usize) -> bool {
    rows >= PAGE_SIZE as usize
}

/// Page count as far as the current page can tell (never below 1)
pub fn page_count_hint(rows: usize) -> u32 {
    (rows as u32).div_ceil(PAGE_SIZE).max(1)
}

#[derive(Clone, Debug, Default, Store)]
pub struct RosterState {
    pub students: Vec<Student>,
    pub query: RosterQuery,
    pub loading: bool,
    /// Banner text
    pub error: Option<String>,
    pub editor: Option<Editor>,
    /// Bumped each time the modal opens
    pub editor_seq: u64,
    /// Student id awaiting delete confirmation
    pub pending_delete: Option<String>,
    /// Sequence number of the newest fetch
    pub latest_fetch: u64,
}

impl RosterState {
    /// Start a fetch of the current query.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            seq: self.latest_fetch,
            page: self.query.page,
            filter: self.query.filter(),
        }
    }

    /// Apply a fetch result. Returns false when a newer fetch superseded it.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket, result: Result<Vec<Student>, ApiError>) -> bool {
        if ticket.seq != self.latest_fetch {
            log::debug!("[ROSTER] Dropping stale page (seq {} < {})", ticket.seq, self.latest_fetch);
            return false;
        }
        self.loading = false;
        match result {
            Ok(rows) => {
                log::debug!("[ROSTER] Loaded {} students for page {}", rows.len(), ticket.page);
                self.students = rows;
            }
            Err(err) => {
                log::error!("[ROSTER] Failed to fetch students: {}", err);
                self.students.clear();
                self.error = Some(message_or(&err, LOAD_FAILED));
            }
        }
        true
    }

    /// New search text; goes back to page 1.
    pub fn set_search(&mut self, search: String) -> Option<FetchTicket> {
        if self.query.search == search {
            return None;
        }
        self.query.search = search;
        self.query.page = 1;
        Some(self.begin_fetch())
    }

    /// New status filter; goes back to page 1.
    pub fn set_status(&mut self, status: Option<StudentStatus>) -> Option<FetchTicket> {
        if self.query.status == status {
            return None;
        }
        self.query.status = status;
        self.query.page = 1;
        Some(self.begin_fetch())
    }

    pub fn has_next(&self) -> bool {
        has_next_page(self.students.len())
    }

    pub fn has_prev(&self) -> bool {
        self.query.page > 1
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.has_next() {
            return None;
        }
        self.query.page += 1;
        Some(self.begin_fetch())
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        if !self.has_prev() {
            return None;
        }
        self.query.page -= 1;
        Some(self.begin_fetch())
    }

    pub fn open_create(&mut self) {
        self.editor_seq += 1;
        self.editor = Some(Editor::Create);
    }

    pub fn open_edit(&mut self, student: Student) {
        self.editor_seq += 1;
        self.editor = Some(Editor::Edit(student));
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Apply the result of a save started by the modal opened as `opened`.
    ///
    /// A success refetches once, from page 1 after a create, and closes that
    /// modal if it is still up. A failure is answered only while the same
    /// modal is open; a dismissed or reopened modal gets nothing.
    pub fn save_finished<T>(&mut self, opened: u64, editor: &Editor, result: Result<T, ApiError>) -> SaveFinish {
        let still_open = self.editor.is_some() && self.editor_seq == opened;
        match SaveOutcome::from(result) {
            SaveOutcome::Saved => {
                if still_open {
                    self.editor = None;
                }
                if matches!(editor, Editor::Create) {
                    self.query.page = 1;
                }
                SaveFinish {
                    reply: None,
                    refetch: Some(self.begin_fetch()),
                }
            }
            failed => {
                log::warn!("[ROSTER] Save failed: {:?}", failed);
                SaveFinish {
                    reply: still_open.then_some(failed),
                    refetch: None,
                }
            }
        }
    }

    pub fn request_delete(&mut self, id: String) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Close the prompt; refetch the same page on success, show a banner on
    /// failure and leave the rows alone.
    pub fn delete_finished<T>(&mut self, result: Result<T, ApiError>) -> Option<FetchTicket> {
        self.pending_delete = None;
        match result {
            Ok(_) => Some(self.begin_fetch()),
            Err(err) => {
                log::error!("[ROSTER] Delete failed: {}", err);
                self.error = Some(message_or(&err, DELETE_FAILED));
                None
            }
        }
    }
}

fn message_or(err: &ApiError, fallback: &str) -> String {
    match err.message() {
        "" => fallback.to_string(),
        msg => msg.to_string(),
    }
}

/// Request the page a ticket describes.
pub async fn fetch_page<T: Transport>(client: &ApiClient<T>, ticket: &FetchTicket) -> Result<Vec<Student>, ApiError> {
    client.list_students(ticket.page, PAGE_SIZE, &ticket.filter).await
}

/// Persist the modal's form: create for [`Editor::Create`], update otherwise.
pub async fn save_student<T: Transport>(client: &ApiClient<T>, editor: &Editor, form: &StudentForm) -> Result<Student, ApiError> {
    match editor {
        Editor::Create => {
            let input = form.to_input().map_err(ApiError::Invalid)?;
            client.create_student(&input).await
        }
        Editor::Edit(existing) => {
            let patch = form.to_patch(existing).map_err(ApiError::Invalid)?;
            client.update_student(&existing.id, &patch).await
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::api::testing::{client, RecordingTransport};
    use crate::api::HttpMethod;

    fn student(id: &str, gpa: Option<f64>, scholarship: bool) -> Student {
        Student {
            id: id.into(),
            name: format!("Student {}", id),
            status: StudentStatus::Active,
            is_scholarship: scholarship,
            attendance_percentage: 80.0,
            assignment_score: 70.0,
            grade_point_average: gpa,
        }
    }

    fn rows(n: usize) -> Vec<Student> {
        (0..n).map(|i| student(&i.to_string(), Some(70.0), false)).collect()
    }

    fn rows_json(n: usize) -> String {
        serde_json::to_string(&rows(n)).unwrap()
    }

    fn list_requests(transport: &RecordingTransport) -> Vec<String> {
        transport
            .sent()
            .into_iter()
            .filter(|r| r.method == HttpMethod::Get)
            .map(|r| r.url)
            .collect()
    }

    #[test]
    fn test_stats_mean_counts_missing_gpa_as_zero() {
        let students = vec![
            student("a", Some(80.0), true),
            student("b", Some(90.0), false),
            student("c", None, true),
        ];
        let stats = RosterStats::from_students(&students);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.scholarship, 2);
        assert_eq!(stats.average_performance, "56.7");
    }

    #[test]
    fn test_stats_empty() {
        let stats = RosterStats::from_students(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.scholarship, 0);
        assert_eq!(stats.average_performance, "0");
    }

    #[test]
    fn test_next_disabled_on_short_page() {
        assert!(!has_next_page(0));
        assert!(!has_next_page(9));
        assert!(has_next_page(10));
    }

    #[test]
    fn test_page_count_hint() {
        assert_eq!(page_count_hint(0), 1);
        assert_eq!(page_count_hint(7), 1);
        assert_eq!(page_count_hint(10), 1);
        assert_eq!(page_count_hint(11), 2);
    }

    #[test]
    fn test_query_filter_drops_empty_values() {
        let query = RosterQuery::default();
        assert_eq!(query.filter(), ListFilter::default());

        let query = RosterQuery {
            page: 2,
            status: Some(StudentStatus::Inactive),
            search: "li".into(),
        };
        assert_eq!(query.filter().search.as_deref(), Some("li"));
        assert_eq!(query.filter().status, Some(StudentStatus::Inactive));
    }

    #[test]
    fn test_search_and_status_reset_page() {
        let mut state = RosterState::default();
        state.query.page = 4;
        let ticket = state.set_search("ann".into()).unwrap();
        assert_eq!(ticket.page, 1);
        assert_eq!(ticket.filter.search.as_deref(), Some("ann"));

        state.query.page = 3;
        let ticket = state.set_status(Some(StudentStatus::Graduated)).unwrap();
        assert_eq!(ticket.page, 1);
        assert_eq!(state.query.page, 1);
    }

    #[test]
    fn test_unchanged_filter_does_not_fetch() {
        let mut state = RosterState::default();
        assert!(state.set_search(String::new()).is_none());
        assert!(state.set_status(None).is_none());
        assert_eq!(state.latest_fetch, 0);
    }

    #[test]
    fn test_pagination_controls() {
        let mut state = RosterState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(&ticket, Ok(rows(10)));
        assert!(!state.has_prev());
        assert!(state.has_next());
        assert!(state.prev_page().is_none());

        let ticket = state.next_page().unwrap();
        assert_eq!(ticket.page, 2);
        state.finish_fetch(&ticket, Ok(rows(4)));
        assert!(!state.has_next());
        assert!(state.next_page().is_none());
        assert_eq!(state.prev_page().unwrap().page, 1);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = RosterState::default();
        let first = state.set_search("a".into()).unwrap();
        let second = state.set_search("ab".into()).unwrap();

        assert!(state.finish_fetch(&second, Ok(rows(2))));
        assert!(!state.finish_fetch(&first, Ok(rows(9))));
        assert_eq!(state.students.len(), 2);
        assert!(!state.loading);
    }

    #[test]
    fn test_stale_response_keeps_loading_for_newer_fetch() {
        let mut state = RosterState::default();
        let first = state.begin_fetch();
        let _second = state.begin_fetch();
        assert!(!state.finish_fetch(&first, Ok(rows(1))));
        assert!(state.loading);
    }

    #[test]
    fn test_fetch_failure_clears_rows_and_sets_banner() {
        let mut state = RosterState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(&ticket, Ok(rows(3)));

        let ticket = state.begin_fetch();
        let err = ApiError::Status {
            status: 401,
            message: "Unauthorized".into(),
        };
        state.finish_fetch(&ticket, Err(err));
        assert!(state.students.is_empty());
        assert_eq!(state.error.as_deref(), Some("Unauthorized"));
        assert!(!state.loading);
    }

    #[test]
    fn test_begin_fetch_clears_banner() {
        let mut state = RosterState {
            error: Some("old".into()),
            ..Default::default()
        };
        state.begin_fetch();
        assert_eq!(state.error, None);
        assert!(state.loading);
    }

    #[test]
    fn test_create_goes_to_page_one_with_one_refetch() {
        let (client, transport, _) = client();
        transport.reply(201, &serde_json::to_string(&student("n", None, false)).unwrap());
        transport.reply(200, &rows_json(1));

        let mut state = RosterState::default();
        state.query.page = 3;
        state.open_create();
        let editor = state.editor.clone().unwrap();
        let form = StudentForm {
            name: "New".into(),
            ..Default::default()
        };

        let opened = state.editor_seq;
        let saved = block_on(save_student(&client, &editor, &form));
        let finish = state.save_finished(opened, &editor, saved);
        assert_eq!(finish.reply, None);
        let ticket = finish.refetch.unwrap();
        let result = block_on(fetch_page(&client, &ticket));
        state.finish_fetch(&ticket, result);

        assert_eq!(state.editor, None);
        assert_eq!(state.query.page, 1);
        assert_eq!(list_requests(&transport), vec![format!("{}/api/students?page=1&limit=10", crate::api::testing::BASE)]);
        assert_eq!(transport.sent()[0].method, HttpMethod::Post);
    }

    #[test]
    fn test_update_refetches_current_page_once() {
        let (client, transport, _) = client();
        transport.reply(200, &serde_json::to_string(&student("7", None, false)).unwrap());
        transport.reply(200, &rows_json(10));

        let mut state = RosterState::default();
        state.query.page = 2;
        state.open_edit(student("7", Some(60.0), false));
        let editor = state.editor.clone().unwrap();

        let saved = block_on(save_student(&client, &editor, &editor.initial_form()));
        let ticket = state.save_finished(state.editor_seq, &editor, saved).refetch.unwrap();
        let result = block_on(fetch_page(&client, &ticket));
        state.finish_fetch(&ticket, result);

        assert_eq!(state.query.page, 2);
        let sent = transport.sent();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert!(sent[0].url.ends_with("/api/students/7"));
        assert_eq!(list_requests(&transport).len(), 1);
        assert!(list_requests(&transport)[0].contains("page=2"));
    }

    #[test]
    fn test_failed_save_keeps_editor_open() {
        let (client, transport, _) = client();
        transport.reply(400, r#"{"message":"Invalid status"}"#);

        let mut state = RosterState::default();
        state.open_create();
        let editor = state.editor.clone().unwrap();
        let form = StudentForm {
            name: "X".into(),
            ..Default::default()
        };

        let saved = block_on(save_student(&client, &editor, &form));
        let finish = state.save_finished(state.editor_seq, &editor, saved);
        assert_eq!(finish.reply, Some(SaveOutcome::Failed("Invalid status".into())));
        assert_eq!(finish.refetch, None);
        assert_eq!(state.editor, Some(Editor::Create));
        assert_eq!(state.latest_fetch, 0);
    }

    #[test]
    fn test_save_after_dismiss_and_reopen_leaves_new_modal_alone() {
        let mut state = RosterState::default();
        state.query.page = 2;
        state.open_create();
        let opened = state.editor_seq;
        state.close_editor();
        state.open_create();

        let finish = state.save_finished(opened, &Editor::Create, Ok(()));
        assert_eq!(finish.reply, None);
        assert_eq!(finish.refetch.map(|t| t.page), Some(1));
        assert_eq!(state.editor, Some(Editor::Create));
        assert_eq!(state.latest_fetch, 1);

        let err = ApiError::Network("offline".into());
        let finish = state.save_finished(opened, &Editor::Create, Err::<(), _>(err));
        assert_eq!(finish, SaveFinish { reply: None, refetch: None });
        assert_eq!(state.editor, Some(Editor::Create));
    }

    #[test]
    fn test_save_after_dismiss_still_refetches_once() {
        let mut state = RosterState::default();
        state.query.page = 3;
        state.open_edit(student("4", None, false));
        let opened = state.editor_seq;
        let editor = state.editor.clone().unwrap();
        state.close_editor();

        let finish = state.save_finished(opened, &editor, Ok(()));
        assert_eq!(finish.reply, None);
        assert_eq!(finish.refetch.map(|t| t.page), Some(3));
        assert_eq!(state.editor, None);
        assert_eq!(state.latest_fetch, 1);
    }

    #[test]
    fn test_each_open_gets_a_new_seq() {
        let mut state = RosterState::default();
        state.open_create();
        let first = state.editor_seq;
        state.close_editor();
        state.open_edit(student("1", None, false));
        assert!(state.editor_seq > first);
    }

    #[test]
    fn test_blank_name_never_reaches_server() {
        let (client, transport, _) = client();
        let err = block_on(save_student(&client, &Editor::Create, &StudentForm::default())).unwrap_err();
        assert_eq!(err.message(), "Name is required");
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_delete_success_refetches_same_page() {
        let mut state = RosterState::default();
        state.query.page = 3;
        state.request_delete("9".into());

        let ticket = state.delete_finished(Ok(())).unwrap();
        assert_eq!(ticket.page, 3);
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.latest_fetch, 1);
    }

    #[test]
    fn test_delete_failure_shows_banner_without_refetch() {
        let mut state = RosterState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(&ticket, Ok(rows(2)));
        state.request_delete("0".into());

        let err = ApiError::Status {
            status: 403,
            message: "Forbidden".into(),
        };
        assert!(state.delete_finished::<()>(Err(err)).is_none());
        assert_eq!(state.error.as_deref(), Some("Forbidden"));
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.students.len(), 2);
        assert_eq!(state.latest_fetch, 1);
    }

    #[test]
    fn test_editor_initial_form() {
        assert_eq!(Editor::Create.initial_form(), StudentForm::default());
        let editor = Editor::Edit(student("1", None, true));
        assert!(editor.initial_form().is_scholarship);
        assert_eq!(editor.student().map(|s| s.id.as_str()), Some("1"));
    }

    #[test]
    fn test_backend_gpa_hides_zero() {
        assert_eq!(Editor::Create.backend_gpa(), None);
        assert_eq!(Editor::Edit(student("1", Some(0.0), false)).backend_gpa(), None);
        assert_eq!(Editor::Edit(student("1", None, false)).backend_gpa(), None);
        assert_eq!(Editor::Edit(student("1", Some(83.5), false)).backend_gpa(), Some(83.5));
    }

    #[test]
    fn test_edit_leaves_untouched_scores_out_of_the_patch() {
        let (client, transport, _) = client();
        transport.reply(200, &serde_json::to_string(&student("5", None, false)).unwrap());

        let mut original = student("5", None, false);
        original.attendance_percentage = 92.4;
        let editor = Editor::Edit(original);
        let mut form = editor.initial_form();
        form.name = "Renamed".into();

        block_on(save_student(&client, &editor, &form)).unwrap();
        let body: serde_json::Value = serde_json::from_str(transport.sent()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Renamed");
        assert!(body.get("attendancePercentage").is_none());
        assert!(body.get("assignmentScore").is_none());
    }
}
