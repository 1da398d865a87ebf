use folio::dataset::StaticDataset;
use folio::prerender::{prerender, PrerenderOptions};
use std::fs;
use tempfile::TempDir;

const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<title>Annie Su | Portfolio</title>
<meta name="description" content="Portfolio">
<meta property="og:title" content="Annie Su | Portfolio" />
<meta property="og:description" content="Portfolio" />
<meta property="og:url" content="https://annie.dev/" />
<meta property="og:image" content="https://annie.dev/og-image.png" />
<meta name="twitter:image" content="https://annie.dev/og-image.png" />
<link rel="canonical" href="https://annie.dev/" />
</head>
<body><div id="root"></div></body>
</html>"#;

fn setup(dataset: &str) -> (TempDir, PrerenderOptions, StaticDataset) {
    let dir = TempDir::new().unwrap();
    let dist = dir.path().join("dist");
    let posts = dir.path().join("posts");
    fs::create_dir_all(&dist).unwrap();
    fs::create_dir_all(&posts).unwrap();
    fs::write(dist.join("index.html"), TEMPLATE).unwrap();
    fs::write(dir.path().join("notes.json"), dataset).unwrap();

    let opts = PrerenderOptions {
        dist_dir: dist,
        posts_dir: Some(posts),
        site_name: "Annie Su".into(),
        site_url: "https://annie.dev".into(),
        default_image: "og-image.png".into(),
    };
    let dataset = StaticDataset::load(dir.path().join("notes.json")).unwrap();
    (dir, opts, dataset)
}

#[test]
fn test_image_from_content_file() {
    let (dir, opts, dataset) = setup(
        r#"[{"id": 1, "title_en": "Genlock", "title_zh": "同步鎖相", "summary": "Sync <everything>"}]"#,
    );
    fs::write(
        dir.path().join("posts/genlock.json"),
        r#"{"content": "Intro\n\n![diagram](/image/genlock.svg)"}"#,
    )
    .unwrap();

    let written = prerender(&dataset.normalized(), &opts).unwrap();
    assert_eq!(written, vec![opts.dist_dir.join("notes/genlock/index.html")]);

    let html = fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains("<title>同步鎖相 | Annie Su</title>"));
    assert!(html.contains(r#"<meta property="og:url" content="https://annie.dev/notes/genlock" />"#));
    assert!(html.contains(r#"<meta property="og:description" content="Sync &lt;everything&gt;" />"#));
    assert!(html.contains(r#"<meta name="twitter:image" content="https://annie.dev/image/genlock.svg" />"#));
    assert!(html.contains(r#"<link rel="canonical" href="https://annie.dev/notes/genlock" />"#));
    // Untouched tags stay as they were
    assert!(html.contains(r#"<meta name="description" content="Portfolio">"#));
}

#[test]
fn test_default_image_and_skipped_slugless_notes() {
    let (_dir, opts, dataset) = setup(
        r#"[{"id": 1, "title_en": "No Pictures"}, {"id": 2, "title_zh": "只有中文"}]"#,
    );

    let written = prerender(&dataset.normalized(), &opts).unwrap();
    assert_eq!(written.len(), 1);

    let html = fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains(r#"content="https://annie.dev/og-image.png""#));
    assert!(!opts.dist_dir.join("notes/index.html").exists());
}

#[test]
fn test_rerun_overwrites_pages() {
    let (_dir, opts, dataset) = setup(r#"[{"id": 1, "title_en": "Again"}]"#);
    prerender(&dataset.normalized(), &opts).unwrap();
    let written = prerender(&dataset.normalized(), &opts).unwrap();
    let html = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(html.matches("<title>").count(), 1);
}
