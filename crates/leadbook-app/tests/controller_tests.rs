// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use leadbook_app::{
    AddOutcome, CategoryBrowser, CategoryId, CategoryRepository, ContactDraft, ContactManager,
    ContactRepository, ContactRow, ContactStatus, NewCategory, SaveOutcome, StatusTone,
    ToastLevel, ToastQueue,
};
use leadbook_testkit::{LeadFaker, MemoryStore, Operation};

fn store_with_category(name: &str) -> Result<(MemoryStore, CategoryId)> {
    let mut store = MemoryStore::new();
    let category = store.insert_category(&NewCategory {
        name: name.to_owned(),
    })?;
    Ok((store, category.id))
}

fn seeded_manager(count: usize) -> Result<(MemoryStore, ContactManager)> {
    let (mut store, category_id) = store_with_category("Bakeries")?;
    let mut faker = LeadFaker::new(19);
    for _ in 0..count {
        store.insert_contact(&faker.contact(&category_id))?;
    }
    let mut manager = ContactManager::new(category_id);
    assert!(manager.load_contacts(&mut store));
    Ok((store, manager))
}

#[test]
fn load_categories_clears_loading_even_on_failure() {
    let mut store = MemoryStore::new();
    store.fail(Operation::ListCategories);
    let mut browser = CategoryBrowser::default();
    assert!(browser.is_loading());

    assert!(!browser.load_categories(&mut store));
    assert!(!browser.is_loading());
    assert!(browser.categories().is_empty());
}

#[test]
fn blank_category_name_is_ignored_without_request() {
    let mut store = MemoryStore::new();
    let mut browser = CategoryBrowser::default();
    browser.new_category_name = "   ".to_owned();

    assert_eq!(browser.add_category(&mut store), None);
    assert_eq!(store.calls(Operation::InsertCategory), 0);
    assert_eq!(browser.new_category_name, "   ");
}

#[test]
fn added_category_is_trimmed_prepended_and_input_cleared() -> Result<()> {
    let (mut store, _) = store_with_category("Barbershops")?;
    let mut browser = CategoryBrowser::default();
    browser.load_categories(&mut store);
    browser.new_category_name = "  Dental Clinics ".to_owned();

    let id = browser.add_category(&mut store).expect("category added");
    assert_eq!(browser.categories()[0].id, id);
    assert_eq!(browser.categories()[0].name, "Dental Clinics");
    assert_eq!(browser.categories().len(), 2);
    assert!(browser.new_category_name.is_empty());
    Ok(())
}

#[test]
fn failed_category_writes_leave_state_unchanged() -> Result<()> {
    let (mut store, existing) = store_with_category("Florists")?;
    let mut browser = CategoryBrowser::default();
    browser.load_categories(&mut store);
    let before = browser.clone();

    store.fail(Operation::InsertCategory);
    browser.new_category_name = "Gyms".to_owned();
    assert_eq!(browser.add_category(&mut store), None);
    assert_eq!(browser.categories(), before.categories());
    assert_eq!(browser.new_category_name, "Gyms");

    store.fail(Operation::DeleteCategory);
    assert!(!browser.delete_category(&mut store, &existing));
    assert_eq!(browser.categories(), before.categories());
    Ok(())
}

#[test]
fn deleting_selected_category_returns_to_list() -> Result<()> {
    let (mut store, id) = store_with_category("Yoga Studios")?;
    let mut browser = CategoryBrowser::default();
    browser.load_categories(&mut store);
    browser.select_category(Some(id.clone()));
    browser.set_adding_contact(true);

    assert!(browser.delete_category(&mut store, &id));
    assert!(browser.categories().is_empty());
    assert_eq!(browser.selected_id(), None);
    assert!(!browser.is_adding_contact());
    Ok(())
}

#[test]
fn selecting_none_resets_adding_flag() -> Result<()> {
    let (mut store, id) = store_with_category("Coffee Shops")?;
    let mut browser = CategoryBrowser::default();
    browser.load_categories(&mut store);
    browser.select_category(Some(id));
    browser.set_adding_contact(true);
    assert!(browser.is_adding_contact());
    assert_eq!(
        browser.selected_category().map(|category| category.name.as_str()),
        Some("Coffee Shops")
    );

    browser.select_category(None);
    assert!(!browser.is_adding_contact());
    assert!(browser.selected_category().is_none());
    Ok(())
}

#[test]
fn blank_business_name_issues_no_insert_and_reports_error() -> Result<()> {
    let (mut store, mut manager) = seeded_manager(2)?;
    let seeded = store.calls(Operation::InsertContact);
    let mut toasts = ToastQueue::default();
    for blank in ["", "   ", "\t\n"] {
        manager.new_contact.business_name = blank.to_owned();
        assert_eq!(
            manager.add_contact(&mut store, &mut toasts),
            AddOutcome::Rejected
        );
    }
    assert_eq!(store.calls(Operation::InsertContact), seeded);
    assert_eq!(store.inserted_contacts().len(), seeded);
    let drained = toasts.drain();
    assert_eq!(drained.len(), 3);
    assert!(drained.iter().all(|toast| toast.level == ToastLevel::Error
        && toast.message == "Business name is required"));
    Ok(())
}

#[test]
fn added_contact_matches_normalized_request_and_heads_list() -> Result<()> {
    let (mut store, mut manager) = seeded_manager(3)?;
    let mut toasts = ToastQueue::default();
    manager.new_contact = ContactDraft {
        business_name: "  Dr. Smith  ".to_owned(),
        email: "  ".to_owned(),
        mobile_number: "555-0100 ".to_owned(),
        status: ContactStatus::default(),
        notes: String::new(),
    };

    let AddOutcome::Added(id) = manager.add_contact(&mut store, &mut toasts) else {
        panic!("contact should be added");
    };
    let requested = store.inserted_contacts().last().expect("insert recorded");
    assert_eq!(requested.business_name, "Dr. Smith");
    assert_eq!(requested.email, None);
    assert_eq!(requested.mobile_number.as_deref(), Some("555-0100"));
    assert_eq!(requested.notes, None);
    assert_eq!(requested.status, ContactStatus::Pending);

    let head = &manager.contacts()[0];
    assert_eq!(head.id, id);
    assert_eq!(head.business_name, requested.business_name);
    assert_eq!(head.email, requested.email);
    assert_eq!(manager.contacts().len(), 4);
    assert_eq!(manager.new_contact, ContactDraft::default());
    assert_eq!(toasts.last().map(|toast| toast.message.as_str()), Some("Contact added"));
    Ok(())
}

#[test]
fn failed_mutations_leave_list_identical() -> Result<()> {
    let (mut store, mut manager) = seeded_manager(3)?;
    let mut toasts = ToastQueue::default();
    let before = manager.contacts().to_vec();
    let target = before[1].id.clone();

    store.fail(Operation::InsertContact);
    manager.new_contact.business_name = "Harbor Co".to_owned();
    assert_eq!(manager.add_contact(&mut store, &mut toasts), AddOutcome::Failed);
    assert_eq!(manager.contacts(), before.as_slice());
    assert_eq!(manager.new_contact.business_name, "Harbor Co");

    store.fail(Operation::UpdateContact);
    assert!(manager.begin_edit(&target, &mut toasts));
    manager
        .edit_draft_mut()
        .expect("editing")
        .status = ContactStatus::Busy;
    assert_eq!(manager.save_edit(&mut store, &mut toasts), SaveOutcome::Failed);
    assert_eq!(manager.contacts(), before.as_slice());
    assert_eq!(manager.editing_id(), Some(&target));
    assert_eq!(
        manager.edit_draft().map(|draft| draft.status.clone()),
        Some(ContactStatus::Busy)
    );

    store.fail(Operation::DeleteContact);
    assert!(!manager.delete_contact(&mut store, &mut toasts, &target));
    assert_eq!(manager.contacts(), before.as_slice());

    let messages: Vec<_> = toasts.drain().into_iter().map(|toast| toast.message).collect();
    assert_eq!(
        messages,
        vec![
            "Failed to add contact",
            "Failed to update contact",
            "Failed to delete contact",
        ]
    );
    Ok(())
}

#[test]
fn successful_edit_changes_only_that_row() -> Result<()> {
    let (mut store, mut manager) = seeded_manager(4)?;
    let mut toasts = ToastQueue::default();
    let before = manager.contacts().to_vec();
    let target = before[2].id.clone();

    assert!(manager.begin_edit(&target, &mut toasts));
    {
        let draft = manager.edit_draft_mut().expect("editing");
        draft.business_name = " Renamed Bakery ".to_owned();
        draft.notes = "call at noon".to_owned();
        draft.email = " ".to_owned();
    }
    assert_eq!(manager.save_edit(&mut store, &mut toasts), SaveOutcome::Saved);
    assert_eq!(manager.editing_id(), None);

    for (index, (old, new)) in before.iter().zip(manager.contacts()).enumerate() {
        if index == 2 {
            assert_eq!(new.business_name, "Renamed Bakery");
            assert_eq!(new.notes.as_deref(), Some("call at noon"));
            assert_eq!(new.email, None);
        } else {
            assert_eq!(old, new);
        }
    }
    let stored = store.stored_contact(&target).expect("stored");
    assert_eq!(stored.business_name, "Renamed Bakery");
    assert_eq!(toasts.last().map(|toast| toast.message.as_str()), Some("Contact updated"));
    Ok(())
}

#[test]
fn save_edit_with_blank_name_is_rejected_without_request() -> Result<()> {
    let (mut store, mut manager) = seeded_manager(1)?;
    let mut toasts = ToastQueue::default();
    let target = manager.contacts()[0].id.clone();

    assert!(manager.begin_edit(&target, &mut toasts));
    manager.edit_draft_mut().expect("editing").business_name = "  ".to_owned();
    assert_eq!(manager.save_edit(&mut store, &mut toasts), SaveOutcome::Rejected);
    assert_eq!(store.calls(Operation::UpdateContact), 0);
    assert_eq!(manager.editing_id(), Some(&target));
    Ok(())
}

#[test]
fn cancel_edit_discards_draft_without_request() -> Result<()> {
    let (mut store, mut manager) = seeded_manager(1)?;
    let mut toasts = ToastQueue::default();
    let before = manager.contacts().to_vec();
    let target = before[0].id.clone();

    manager.begin_edit(&target, &mut toasts);
    manager.edit_draft_mut().expect("editing").business_name = "Other".to_owned();
    manager.cancel_edit();
    assert_eq!(manager.editing_id(), None);
    assert_eq!(manager.contacts(), before.as_slice());
    assert_eq!(store.calls(Operation::UpdateContact), 0);
    assert_eq!(manager.save_edit(&mut store, &mut toasts), SaveOutcome::NotEditing);
    Ok(())
}

#[test]
fn only_one_row_edits_and_dirty_drafts_block_switching() -> Result<()> {
    let (_store, mut manager) = seeded_manager(3)?;
    let mut toasts = ToastQueue::default();
    let first = manager.contacts()[0].id.clone();
    let second = manager.contacts()[1].id.clone();

    assert!(manager.begin_edit(&first, &mut toasts));
    assert!(manager.begin_edit(&second, &mut toasts));
    assert_eq!(manager.editing_id(), Some(&second));
    assert!(toasts.is_empty());

    manager.edit_draft_mut().expect("editing").notes = "pending change".to_owned();
    assert!(!manager.begin_edit(&first, &mut toasts));
    assert_eq!(manager.editing_id(), Some(&second));
    assert_eq!(
        manager.edit_draft().map(|draft| draft.notes.as_str()),
        Some("pending change")
    );
    assert_eq!(
        toasts.last().map(|toast| toast.message.as_str()),
        Some("Finish or cancel the current edit first")
    );
    Ok(())
}

#[test]
fn switching_category_replaces_rows() -> Result<()> {
    let mut store = MemoryStore::new();
    let mut faker = LeadFaker::new(5);
    let first = store.insert_category(&NewCategory {
        name: "Auto Repair".to_owned(),
    })?;
    let second = store.insert_category(&NewCategory {
        name: "Pet Groomers".to_owned(),
    })?;
    for _ in 0..3 {
        store.insert_contact(&faker.contact(&first.id))?;
    }
    store.insert_contact(&faker.contact(&second.id))?;

    let mut manager = ContactManager::new(first.id.clone());
    manager.load_contacts(&mut store);
    assert_eq!(manager.contacts().len(), 3);

    assert!(manager.scope_to(&mut store, second.id.clone()));
    assert_eq!(manager.category_id(), &second.id);
    assert_eq!(manager.contacts().len(), 1);
    assert!(
        manager
            .contacts()
            .iter()
            .all(|contact| contact.category_id == second.id)
    );

    manager.new_contact.business_name = "Half typed".to_owned();
    assert!(manager.scope_to(&mut store, second.id.clone()));
    assert_eq!(manager.new_contact, ContactDraft::default());

    store.fail(Operation::ListContacts);
    assert!(!manager.scope_to(&mut store, first.id.clone()));
    assert!(manager.contacts().is_empty());
    assert!(!manager.is_loading());
    Ok(())
}

#[test]
fn dental_clinic_walkthrough() -> Result<()> {
    let mut store = MemoryStore::new();
    let mut toasts = ToastQueue::default();
    let mut browser = CategoryBrowser::default();
    browser.load_categories(&mut store);
    assert!(browser.categories().is_empty());

    browser.new_category_name = "Dental Clinics".to_owned();
    let category_id = browser.add_category(&mut store).expect("added");
    assert_eq!(browser.categories()[0].name, "Dental Clinics");

    browser.select_category(Some(category_id.clone()));
    let mut manager = ContactManager::new(category_id);
    manager.load_contacts(&mut store);
    assert!(manager.contacts().is_empty());

    browser.set_adding_contact(true);
    manager.new_contact.business_name = "Dr. Smith".to_owned();
    manager.new_contact.email = String::new();
    let AddOutcome::Added(contact_id) = manager.add_contact(&mut store, &mut toasts) else {
        panic!("contact should be added");
    };
    browser.set_adding_contact(false);
    let row = ContactRow::from_contact(&manager.contacts()[0]);
    assert_eq!(row.cells[1], "-");
    assert_eq!(row.cells[ContactRow::STATUS_COLUMN], "Pending");
    assert_eq!(row.tone, Some(StatusTone::Yellow));

    manager.begin_edit(&contact_id, &mut toasts);
    manager.edit_draft_mut().expect("editing").status = ContactStatus::Busy;
    assert_eq!(manager.save_edit(&mut store, &mut toasts), SaveOutcome::Saved);
    let row = ContactRow::from_contact(&manager.contacts()[0]);
    assert_eq!(row.cells[ContactRow::STATUS_COLUMN], "Busy");
    assert_eq!(row.tone, Some(StatusTone::Red));
    assert_eq!(manager.editing_id(), None);

    assert!(manager.delete_contact(&mut store, &mut toasts, &contact_id));
    assert!(manager.contacts().is_empty());
    let messages: Vec<_> = toasts.drain().into_iter().map(|toast| toast.message).collect();
    assert_eq!(
        messages,
        vec!["Contact added", "Contact updated", "Contact deleted"]
    );
    Ok(())
}
