//! Subcommand implementations.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};
use closet::domain::error::DomainError;
use closet::domain::taxonomy::{self, TagGroupSpec};
use closet::domain::{palette, wizard::Wizard};
use closet::{
    AttributeTag, Category, ClosetClient, ColorToken, ImagePayload, ItemFilter, OutfitPair,
    PantsType, PersistedItem, Session, SubType,
};
use tracing::{debug, info};
use url::Url;

/// Everything a command needs: the client and who is acting.
pub struct Context {
    pub client: Arc<dyn ClosetClient>,
    pub session: Session,
}

pub struct AddItem {
    pub image: std::path::PathBuf,
    pub category: Category,
    pub sub_type: Option<SubType>,
    pub pants_type: Option<PantsType>,
    pub tags: Vec<AttributeTag>,
    pub colors: Vec<ColorToken>,
}

fn rejected(e: &DomainError) -> anyhow::Error {
    debug!(error = %e, "wizard rejected input");
    anyhow!(e.user_message())
}

/// Walk the wizard exactly as an interactive user would, one step at a time.
pub async fn add_item(ctx: &Context, mut wizard: Wizard, args: AddItem) -> Result<PersistedItem> {
    let image = read_image(&args.image).await?;

    wizard.set_image(image).map_err(|e| rejected(&e))?;
    wizard.next().map_err(|e| rejected(&e))?;

    wizard.set_category(args.category).map_err(|e| rejected(&e))?;
    wizard.next().map_err(|e| rejected(&e))?;

    if let Some(sub_type) = args.sub_type {
        wizard.set_sub_type(sub_type).map_err(|e| rejected(&e))?;
    }
    if let Some(pants_type) = args.pants_type {
        wizard.set_pants_type(pants_type).map_err(|e| rejected(&e))?;
    }
    for tag in args.tags {
        wizard.toggle_tag(tag).map_err(|e| rejected(&e))?;
    }
    wizard.next().map_err(|e| rejected(&e))?;

    for color in args.colors {
        wizard.toggle_color(color).map_err(|e| rejected(&e))?;
    }
    wizard.next().map_err(|e| rejected(&e))?;

    let item = wizard
        .submit(ctx.client.as_ref(), &ctx.session)
        .await
        .map_err(|e| rejected(&e))?;
    info!(item_id = %item.id, "item added");
    Ok(item)
}

async fn read_image(path: &Path) -> Result<ImagePayload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;
    let mut image = ImagePayload::new(bytes, guess_mime(path));
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        image = image.with_file_name(name);
    }
    Ok(image)
}

/// Content type from the file extension. Unknown extensions are not images.
fn guess_mime(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let known = match ext.as_deref() {
        Some("png") => Some(mime::IMAGE_PNG),
        Some("jpg" | "jpeg") => Some(mime::IMAGE_JPEG),
        Some("gif") => Some(mime::IMAGE_GIF),
        Some("bmp") => Some(mime::IMAGE_BMP),
        Some("svg") => Some(mime::IMAGE_SVG),
        Some("webp") => "image/webp".parse().ok(),
        Some("heic") => "image/heic".parse().ok(),
        _ => None,
    };
    known.unwrap_or(mime::APPLICATION_OCTET_STREAM)
}

pub async fn list_items(ctx: &Context, filter: &ItemFilter) -> Result<String> {
    let items = ctx.client.list_items(&ctx.session, filter).await?;
    render_items(&items)
}

pub async fn save_pair(ctx: &Context, top: &Url, bottom: &Url) -> Result<OutfitPair> {
    let pair = ctx
        .client
        .save_outfit_pair(&ctx.session, top, bottom)
        .await
        .map_err(|e| rejected(&DomainError::Submission(e)))?;
    info!(pair_id = %pair.id, "outfit pair saved");
    Ok(pair)
}

pub async fn list_pairs(ctx: &Context) -> Result<String> {
    let pairs = ctx.client.list_outfit_pairs(&ctx.session).await?;
    let mut out = String::new();
    for pair in &pairs {
        writeln!(
            out,
            "{}  {}  top={}  bottom={}",
            pair.created_at.format("%Y-%m-%d %H:%M"),
            pair.id,
            pair.top_url,
            pair.bottom_url
        )?;
    }
    if pairs.is_empty() {
        out.push_str("No outfit pairs saved.\n");
    }
    Ok(out)
}

fn join<'a, T: ToString + 'a>(values: impl IntoIterator<Item = &'a T>, sep: &str) -> String {
    values
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

fn render_items(items: &[PersistedItem]) -> Result<String> {
    let mut out = String::new();
    for item in items {
        let mut kind = item.category.to_string();
        if let Some(sub_type) = item.sub_type {
            write!(kind, "/{sub_type}")?;
        }
        if let Some(pants_type) = item.pants_type {
            write!(kind, "/{pants_type}")?;
        }
        writeln!(
            out,
            "{}  {}  {kind}  colors={}  tags={}  {}",
            item.created_at.format("%Y-%m-%d %H:%M"),
            item.id,
            join(&item.colors, ","),
            join(&item.attribute_tags, ","),
            item.image_url
        )?;
    }
    if items.is_empty() {
        out.push_str("No items found.\n");
    }
    Ok(out)
}

fn render_groups(out: &mut String, indent: &str, groups: &[&TagGroupSpec]) -> std::fmt::Result {
    for group in groups {
        let options: Vec<String> = group
            .options
            .iter()
            .map(|o| format!("{}:{}", group.group, o.value))
            .collect();
        writeln!(out, "{indent}{}: {}", group.title, options.join(" "))?;
    }
    Ok(())
}

/// The full selection tree followed by the color palette.
///
/// # Errors
/// Only if formatting fails.
pub fn render_taxonomy() -> Result<String> {
    let mut out = String::new();
    for category in taxonomy::categories() {
        writeln!(out, "{category}")?;
        let category_groups = taxonomy::tag_groups(category, None, None);
        render_groups(&mut out, "    ", &category_groups)?;
        for sub_type in taxonomy::sub_types(category) {
            writeln!(out, "  {sub_type}")?;
            // Each level lists only the groups it adds to the level above.
            let groups = taxonomy::tag_groups(category, Some(sub_type), None);
            let own = &groups[..groups.len().saturating_sub(category_groups.len())];
            render_groups(&mut out, "      ", own)?;
            for pants_type in taxonomy::pants_types(category, Some(sub_type)) {
                writeln!(out, "    {pants_type}")?;
                let all = taxonomy::tag_groups(category, Some(sub_type), Some(pants_type));
                let own = &all[..all.len().saturating_sub(groups.len())];
                render_groups(&mut out, "        ", own)?;
            }
        }
    }
    out.push_str("\ncolors\n");
    for entry in palette::entries() {
        writeln!(out, "  {}", join(&entry.tokens, " "))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use closet::ClosetConfig;
    use closet::ClosetModule;
    use closet::infra::storage::{FsBlobStore, FsRecordStore};
    use uuid::Uuid;

    fn context(home: &Path) -> (ClosetModule, Context) {
        let module = ClosetModule::new(
            ClosetConfig::default(),
            Arc::new(FsBlobStore::new(home).unwrap()),
            Arc::new(FsRecordStore::new(home)),
        );
        let ctx = Context {
            client: module.client(),
            session: Session::new(Uuid::new_v4(), "cli@example.com"),
        };
        (module, ctx)
    }

    fn args(image: std::path::PathBuf) -> AddItem {
        AddItem {
            image,
            category: Category::Bottom,
            sub_type: Some(SubType::Pants),
            pants_type: Some(PantsType::Jeans),
            tags: vec!["fit:baggy".parse().unwrap()],
            colors: vec!["denim".parse().unwrap()],
        }
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(guess_mime(Path::new("a.PNG")), mime::IMAGE_PNG);
        assert_eq!(guess_mime(Path::new("a.jpeg")), mime::IMAGE_JPEG);
        assert_eq!(guess_mime(Path::new("a.webp")).type_(), mime::IMAGE);
        assert_eq!(guess_mime(Path::new("notes.txt")), mime::APPLICATION_OCTET_STREAM);
        assert_eq!(guess_mime(Path::new("noext")), mime::APPLICATION_OCTET_STREAM);
    }

    #[tokio::test]
    async fn add_item_goes_through_the_wizard() {
        let home = tempfile::tempdir().unwrap();
        let image = home.path().join("jeans.jpg");
        std::fs::write(&image, [0xff, 0xd8, 0xff]).unwrap();
        let (module, ctx) = context(home.path());

        let item = add_item(&ctx, module.new_wizard(), args(image)).await.unwrap();

        assert_eq!(item.pants_type, Some(PantsType::Jeans));
        assert!(item.image_url.to_file_path().unwrap().exists());
        let listing = list_items(&ctx, &ItemFilter::default()).await.unwrap();
        assert!(listing.contains("bottom/pants/jeans"));
        assert!(listing.contains("fit:baggy"));
    }

    #[tokio::test]
    async fn missing_pants_type_is_reported() {
        let home = tempfile::tempdir().unwrap();
        let image = home.path().join("jeans.jpg");
        std::fs::write(&image, [0xff, 0xd8, 0xff]).unwrap();
        let (module, ctx) = context(home.path());
        let mut args = args(image);
        args.pants_type = None;
        args.tags.clear();

        let err = add_item(&ctx, module.new_wizard(), args).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            closet::domain::draft::PANTS_TYPE_REQUIRED
        );
    }

    #[tokio::test]
    async fn non_image_file_is_rejected() {
        let home = tempfile::tempdir().unwrap();
        let notes = home.path().join("notes.txt");
        std::fs::write(&notes, "hello").unwrap();
        let (module, ctx) = context(home.path());

        let err = add_item(&ctx, module.new_wizard(), args(notes)).await.unwrap_err();

        assert_eq!(err.to_string(), "Please choose an image file.");
    }

    #[test]
    fn taxonomy_lists_every_category_and_palette() {
        let text = render_taxonomy().unwrap();
        for category in Category::ALL {
            assert!(text.contains(&format!("{category}\n")));
        }
        assert!(text.contains("    jeans\n"));
        assert!(text.contains("fit:baggy"));
        assert!(text.contains("  red light-red dark-red\n"));
        assert!(text.contains("\n  white\n"));
    }

    #[tokio::test]
    async fn empty_listings() {
        let home = tempfile::tempdir().unwrap();
        let (_module, ctx) = context(home.path());
        assert_eq!(
            list_items(&ctx, &ItemFilter::default()).await.unwrap(),
            "No items found.\n"
        );
        assert_eq!(list_pairs(&ctx).await.unwrap(), "No outfit pairs saved.\n");
    }
}
