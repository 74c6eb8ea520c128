use super::*;
use shared::domain::PLACEHOLDER_IMAGE;
use std::time::Duration;

#[derive(Default)]
struct RecordingSink {
    received: Vec<Draft>,
}

impl SubmissionSink for RecordingSink {
    fn submit(&mut self, draft: Draft) {
        self.received.push(draft);
    }
}

fn strict_form() -> PostDraftController<RecordingSink> {
    PostDraftController::new(FormSettings::strict(), RecordingSink::default())
}

fn loose_form() -> PostDraftController<RecordingSink> {
    PostDraftController::new(FormSettings::loose(), RecordingSink::default())
}

fn add(form: &mut PostDraftController<RecordingSink>, tag: &str) -> AddTagOutcome {
    form.update_tag_buffer(tag);
    form.add_tag()
}

fn fill_required(form: &mut PostDraftController<RecordingSink>) {
    form.update_field(DraftField::Title, "T", InputKind::Text)
        .expect("title");
    form.update_field(DraftField::Content, "C", InputKind::Textarea)
        .expect("content");
    form.update_field(DraftField::Category, "Science", InputKind::Select)
        .expect("category");
    assert_eq!(add(form, "news"), AddTagOutcome::Added);
}

#[test]
fn new_form_starts_from_default_draft() {
    let form = strict_form();
    assert_eq!(form.draft(), &Draft::default());
    assert_eq!(form.pending_tag(), "");
    assert!(form.errors().is_empty());
    assert!(!form.success_visible());
}

#[test]
fn placeholder_image_comes_from_settings() {
    let settings = FormSettings {
        placeholder_image: "https://example.test/none.png".into(),
        ..FormSettings::strict()
    };
    let form = PostDraftController::new(settings, RecordingSink::default());
    assert_eq!(form.draft().image, "https://example.test/none.png");
}

#[test]
fn text_fields_store_raw_values_unchanged() {
    let mut form = strict_form();
    form.update_field(DraftField::Title, "  Hello  ", InputKind::Text)
        .expect("title");
    form.update_field(DraftField::Content, "line one\nline two", InputKind::Textarea)
        .expect("content");
    form.update_field(DraftField::Category, "Health", InputKind::Select)
        .expect("category");

    assert_eq!(form.draft().title, "  Hello  ");
    assert_eq!(form.draft().content, "line one\nline two");
    assert_eq!(form.draft().category, "Health");
    assert!(form.errors().is_empty(), "editing never validates");
}

#[test]
fn radio_published_coerces_to_tri_state() {
    let mut form = strict_form();
    assert_eq!(form.draft().published, None);

    form.update_field(DraftField::Published, "true", InputKind::Radio)
        .expect("yes");
    assert_eq!(form.draft().published, Some(true));

    form.update_field(DraftField::Published, "false", InputKind::Radio)
        .expect("no");
    assert_eq!(form.draft().published, Some(false));

    form.update_field(DraftField::Published, "anything", InputKind::Radio)
        .expect("other radio value");
    assert_eq!(form.draft().published, Some(false));
}

#[test]
fn non_radio_published_only_accepts_literal_flags() {
    let mut form = strict_form();
    form.update_field(DraftField::Published, "true", InputKind::Text)
        .expect("true");
    assert_eq!(form.draft().published, Some(true));

    form.update_field(DraftField::Published, "maybe", InputKind::Text)
        .expect("unset");
    assert_eq!(form.draft().published, None);
}

#[test]
fn read_only_fields_are_refused() {
    let mut form = strict_form();
    for field in [DraftField::Id, DraftField::Image, DraftField::Tags] {
        assert_eq!(
            form.update_field(field, "x", InputKind::Text),
            Err(FormError::ReadOnlyField(field))
        );
    }
    assert_eq!(form.draft(), &Draft::default());
}

#[test]
fn add_tag_stores_trimmed_value_and_clears_buffer() {
    let mut form = strict_form();
    assert_eq!(add(&mut form, "  rust  "), AddTagOutcome::Added);

    assert_eq!(form.draft().tags, vec!["rust".to_string()]);
    assert_eq!(form.pending_tag(), "");
}

#[test]
fn add_tag_keeps_insertion_order() {
    let mut form = strict_form();
    for tag in ["b", "a", "c"] {
        assert_eq!(add(&mut form, tag), AddTagOutcome::Added);
    }
    assert_eq!(form.draft().tags, vec!["b", "a", "c"]);
}

#[test]
fn blank_tag_is_ignored() {
    let mut form = strict_form();
    assert_eq!(
        add(&mut form, "   "),
        AddTagOutcome::Rejected(TagRejection::Blank)
    );
    assert!(form.draft().tags.is_empty());
    assert_eq!(form.pending_tag(), "   ", "buffer survives a rejected add");
}

#[test]
fn duplicate_tag_is_ignored_case_sensitively() {
    let mut form = strict_form();
    add(&mut form, "news");

    assert_eq!(
        add(&mut form, " news "),
        AddTagOutcome::Rejected(TagRejection::Duplicate)
    );
    assert_eq!(form.draft().tags, vec!["news"]);

    assert_eq!(add(&mut form, "News"), AddTagOutcome::Added);
    assert_eq!(form.draft().tags, vec!["news", "News"]);
}

#[test]
fn sixth_tag_is_ignored() {
    let mut form = strict_form();
    for tag in ["a", "b", "c", "d", "e"] {
        assert_eq!(add(&mut form, tag), AddTagOutcome::Added);
    }

    assert_eq!(
        add(&mut form, "f"),
        AddTagOutcome::Rejected(TagRejection::AtCapacity)
    );
    assert_eq!(form.draft().tags.len(), MAX_TAGS);
    assert_eq!(form.pending_tag(), "f");
}

#[test]
fn delete_tag_removes_only_that_position() {
    let mut form = strict_form();
    for tag in ["a", "b", "c", "d"] {
        add(&mut form, tag);
    }

    assert_eq!(form.delete_tag(1), Some("b".to_string()));
    assert_eq!(form.draft().tags, vec!["a", "c", "d"]);

    assert_eq!(form.delete_tag(2), Some("d".to_string()));
    assert_eq!(form.draft().tags, vec!["a", "c"]);
}

#[test]
fn delete_tag_out_of_range_is_ignored() {
    let mut form = strict_form();
    add(&mut form, "only");

    assert_eq!(form.delete_tag(1), None);
    assert_eq!(form.delete_tag(usize::MAX), None);
    assert_eq!(form.draft().tags, vec!["only"]);
}

#[test]
fn deleting_frees_capacity_for_another_tag() {
    let mut form = strict_form();
    for tag in ["a", "b", "c", "d", "e"] {
        add(&mut form, tag);
    }
    form.delete_tag(0);

    assert_eq!(add(&mut form, "f"), AddTagOutcome::Added);
    assert_eq!(form.draft().tags, vec!["b", "c", "d", "e", "f"]);
}

#[test]
fn strict_submit_of_empty_form_records_all_errors() {
    let mut form = strict_form();

    assert_eq!(form.submit(), SubmitOutcome::Invalid);
    assert_eq!(form.errors().len(), 4);
    assert!(form.sink().received.is_empty());
    assert!(!form.success_visible());
}

#[test]
fn strict_submit_keeps_draft_when_invalid() {
    let mut form = strict_form();
    form.update_field(DraftField::Title, "Only a title", InputKind::Text)
        .expect("title");

    assert_eq!(form.submit(), SubmitOutcome::Invalid);
    assert_eq!(form.draft().title, "Only a title");
    assert_eq!(form.errors().get(DraftField::Title), None);
    assert_eq!(form.errors().len(), 3);
}

#[test]
fn errors_clear_after_a_valid_submit() {
    let mut form = strict_form();
    assert_eq!(form.submit(), SubmitOutcome::Invalid);
    assert!(!form.errors().is_empty());

    fill_required(&mut form);
    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert!(form.errors().is_empty());
}

#[test]
fn loose_submit_forwards_default_draft_without_validating() {
    let mut form = loose_form();

    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert_eq!(form.sink().received, vec![Draft::default()]);
    assert!(form.errors().is_empty());
    assert!(!form.success_visible());
}

#[test]
fn loose_submit_resets_the_draft_but_not_the_tag_buffer() {
    let mut form = loose_form();
    form.update_field(DraftField::Title, "draft", InputKind::Text)
        .expect("title");
    add(&mut form, "a");
    form.update_tag_buffer("typing");

    form.submit();
    assert_eq!(form.draft(), &Draft::default());
    assert_eq!(form.pending_tag(), "typing");
    assert_eq!(form.sink().received[0].tags, vec!["a"]);
}

#[test]
fn closures_can_serve_as_sinks() {
    let mut titles = Vec::new();
    {
        let mut form = PostDraftController::new(FormSettings::loose(), |draft: Draft| {
            titles.push(draft.title)
        });
        form.update_field(DraftField::Title, "from closure", InputKind::Text)
            .expect("title");
        form.submit();
    }
    assert_eq!(titles, vec!["from closure".to_string()]);
}

#[test]
fn handle_dispatches_every_command() {
    let mut form = strict_form();

    assert_eq!(
        form.handle(FormCommand::UpdateField {
            field: DraftField::Title,
            value: "T".into(),
            input: InputKind::Text,
        }),
        Ok(CommandOutcome::FieldUpdated)
    );
    assert_eq!(
        form.handle(FormCommand::UpdateTagBuffer { text: "x".into() }),
        Ok(CommandOutcome::TagBufferUpdated)
    );
    assert_eq!(
        form.handle(FormCommand::AddTag),
        Ok(CommandOutcome::Tag(AddTagOutcome::Added))
    );
    assert_eq!(
        form.handle(FormCommand::DeleteTag { index: 3 }),
        Ok(CommandOutcome::TagDeleted(None))
    );
    assert_eq!(
        form.handle(FormCommand::DeleteTag { index: 0 }),
        Ok(CommandOutcome::TagDeleted(Some("x".into())))
    );
    assert_eq!(
        form.handle(FormCommand::Submit),
        Ok(CommandOutcome::Submit(SubmitOutcome::Invalid))
    );
    assert_eq!(
        form.handle(FormCommand::UpdateField {
            field: DraftField::Image,
            value: "x".into(),
            input: InputKind::Text,
        }),
        Err(FormError::ReadOnlyField(DraftField::Image))
    );
}

#[test]
fn subscribers_see_edits_rejections_and_failures() {
    let mut form = strict_form();
    let mut events = form.subscribe();

    form.update_field(DraftField::Title, "T", InputKind::Text)
        .expect("title");
    form.update_tag_buffer(" ");
    form.add_tag();
    form.submit();

    match events.try_recv().expect("draft updated") {
        FormEvent::DraftUpdated { draft } => assert_eq!(draft.title, "T"),
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        events.try_recv().expect("tag rejected"),
        FormEvent::TagRejected {
            tag: String::new(),
            reason: TagRejection::Blank,
        }
    );
    match events.try_recv().expect("validation failed") {
        FormEvent::ValidationFailed { errors } => assert_eq!(errors.len(), 3),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(events.try_recv().is_err());
}

#[test]
fn strict_submit_without_runtime_keeps_notice_until_dismissed() {
    let mut form = strict_form();
    fill_required(&mut form);

    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert!(form.success_visible());

    form.dismiss_success();
    assert!(!form.success_visible());
}

#[tokio::test(start_paused = true)]
async fn success_notice_clears_after_configured_delay() {
    let mut form = strict_form();
    let mut events = form.subscribe();
    fill_required(&mut form);

    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert!(form.success_visible());
    assert_eq!(form.draft().image, PLACEHOLDER_IMAGE);

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert!(form.success_visible());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(!form.success_visible());

    let mut saw_clear = false;
    while let Ok(event) = events.try_recv() {
        saw_clear |= event == FormEvent::SuccessCleared;
    }
    assert!(saw_clear);
}

#[tokio::test(start_paused = true)]
async fn resubmitting_restarts_the_notice_timer() {
    let mut form = strict_form();
    fill_required(&mut form);
    form.submit();

    tokio::time::sleep(Duration::from_millis(2000)).await;
    fill_required(&mut form);
    form.submit();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(form.success_visible(), "first timer was aborted");

    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert!(!form.success_visible());
    assert_eq!(form.sink().received.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_clear() {
    let mut form = strict_form();
    fill_required(&mut form);
    form.submit();

    form.teardown();
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert!(form.success_visible());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_form_aborts_the_clear_task() {
    let mut form = strict_form();
    let mut events = form.subscribe();
    fill_required(&mut form);
    form.submit();
    drop(form);

    tokio::time::sleep(Duration::from_millis(5000)).await;
    while let Ok(event) = events.try_recv() {
        assert_ne!(event, FormEvent::SuccessCleared);
    }
}
