//! End-to-end flows through the module: wizard, local client and the
//! in-memory backends.

use std::collections::BTreeSet;
use std::sync::Arc;

use closet::domain::draft::PANTS_TYPE_REQUIRED;
use closet::domain::notice::NoticeKind;
use closet::infra::storage::{InMemoryBlobStore, InMemoryRecordStore};
use closet::{
    AttributeTag, Category, ClosetClient, ClosetConfig, ClosetError, ClosetModule, DomainError,
    ImagePayload, ItemFilter, PantsType, Session, SubType, TagGroup, WizardStep,
};
use uuid::Uuid;

struct Harness {
    module: ClosetModule,
    blobs: Arc<InMemoryBlobStore>,
    records: Arc<InMemoryRecordStore>,
    session: Session,
}

fn harness() -> Harness {
    let blobs = Arc::new(InMemoryBlobStore::new());
    let records = Arc::new(InMemoryRecordStore::new());
    let module = ClosetModule::new(ClosetConfig::default(), blobs.clone(), records.clone());
    let session = Session::new(Uuid::new_v4(), "tester@example.com");
    module.sessions().publish(Some(session.clone()));
    Harness {
        module,
        blobs,
        records,
        session,
    }
}

fn photo(name: &str) -> ImagePayload {
    ImagePayload::new(vec![0xff, 0xd8, 0xff, 0xe0], mime::IMAGE_JPEG).with_file_name(name)
}

#[tokio::test]
async fn red_short_sleeve_shirt_is_saved() {
    let h = harness();
    let client = h.module.client();
    let session = h.module.sessions().require().unwrap();
    let mut wizard = h.module.new_wizard();

    wizard.set_image(photo("shirt.jpg")).unwrap();
    wizard.next().unwrap();
    wizard.set_category(Category::Top).unwrap();
    wizard.next().unwrap();
    wizard.set_sub_type(SubType::Shirt).unwrap();
    wizard
        .toggle_tag(AttributeTag::new(TagGroup::Sleeve, "short"))
        .unwrap();
    wizard.next().unwrap();
    wizard.toggle_color("red".parse().unwrap()).unwrap();
    wizard.toggle_color("dark-blue".parse().unwrap()).unwrap();
    wizard.next().unwrap();
    assert_eq!(wizard.step(), WizardStep::Review);

    let item = wizard.submit(client.as_ref(), &session).await.unwrap();

    assert_eq!(item.owner_id, h.session.user_id());
    assert_eq!(item.sub_type, Some(SubType::Shirt));
    assert_eq!(item.pants_type, None);
    assert_eq!(
        item.attribute_tags.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["sleeve:short"]
    );
    assert_eq!(
        item.colors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["red", "dark-blue"]
    );
    assert!(h.blobs.get(&item.image_url).is_some());
    assert_eq!(h.records.items().len(), 1);
    assert_eq!(wizard.step(), WizardStep::Image);
}

#[tokio::test]
async fn pants_need_a_pants_type() {
    let h = harness();
    let mut wizard = h.module.new_wizard();

    wizard.set_image(photo("jeans.jpg")).unwrap();
    wizard.next().unwrap();
    wizard.set_category(Category::Bottom).unwrap();
    wizard.next().unwrap();
    wizard.set_sub_type(SubType::Pants).unwrap();

    let err = wizard.next().unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    let notice = wizard.notice().unwrap();
    assert_eq!(notice.kind(), NoticeKind::Validation);
    assert_eq!(notice.message(), PANTS_TYPE_REQUIRED);
    assert_eq!(wizard.step(), WizardStep::Details);

    wizard.set_pants_type(PantsType::Jeans).unwrap();
    assert_eq!(wizard.next().unwrap(), WizardStep::Colors);
}

#[tokio::test]
async fn category_change_clears_details() {
    let h = harness();
    let mut wizard = h.module.new_wizard();

    wizard.set_image(photo("top.jpg")).unwrap();
    wizard.next().unwrap();
    wizard.set_category(Category::Top).unwrap();
    wizard.next().unwrap();
    wizard.set_sub_type(SubType::Jacket).unwrap();
    wizard
        .toggle_tag(AttributeTag::new(TagGroup::JacketType, "denim"))
        .unwrap();
    wizard.back().unwrap();
    wizard.set_category(Category::Dress).unwrap();

    assert_eq!(wizard.draft().sub_type(), None);
    assert!(wizard.draft().attribute_tags().is_empty());
}

#[tokio::test]
async fn switching_bottom_to_top_drops_pants_fields() {
    let h = harness();
    let mut wizard = h.module.new_wizard();

    wizard.set_image(photo("jeans.jpg")).unwrap();
    wizard.next().unwrap();
    wizard.set_category(Category::Bottom).unwrap();
    wizard.next().unwrap();
    wizard.set_sub_type(SubType::Pants).unwrap();
    wizard.set_pants_type(PantsType::Jeans).unwrap();
    wizard.back().unwrap();
    wizard.set_category(Category::Top).unwrap();

    assert_eq!(wizard.draft().sub_type(), None);
    assert_eq!(wizard.draft().pants_type(), None);
    wizard.next().unwrap();
    assert!(wizard.next().is_err(), "top needs a subtype again");
}

#[tokio::test]
async fn saving_the_same_pair_twice_is_a_duplicate() {
    let h = harness();
    let client = h.module.client();
    let session = h.session.clone();
    let service = h.module.service();

    let mut urls = Vec::new();
    for (category, sub_type, pants) in [
        (Category::Top, SubType::Sweater, None),
        (Category::Bottom, SubType::Pants, Some(PantsType::Khakis)),
        (Category::Bottom, SubType::Skirts, None),
    ] {
        let mut submission = closet::ItemSubmission {
            item: closet::NewItem {
                category,
                sub_type: Some(sub_type),
                pants_type: pants,
                attribute_tags: BTreeSet::new(),
                colors: ["dark-green".parse().unwrap()].into(),
            },
            image: photo("item.jpg"),
        };
        submission.image.file_name = None;
        urls.push(service.submit_item(&session, submission).await.unwrap().image_url);
    }
    let (a, b, c) = (&urls[0], &urls[1], &urls[2]);

    client.save_outfit_pair(&session, a, b).await.unwrap();
    assert_eq!(
        client.save_outfit_pair(&session, a, b).await.unwrap_err(),
        ClosetError::DuplicatePair
    );
    client.save_outfit_pair(&session, a, c).await.unwrap();

    assert_eq!(client.list_outfit_pairs(&session).await.unwrap().len(), 2);
    let bottoms = client
        .list_items(&session, &ItemFilter::category(Category::Bottom))
        .await
        .unwrap();
    assert_eq!(bottoms.len(), 2);
}
