//! Full-pipeline tests against generated PDF documents.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use culinyx_db::{MemoryStore, VectorStore};
use culinyx_embed::{EmbedError, Embedder};
use culinyx_ingestion::{
    pdf::PdfDocument, run_indexing, FailurePolicy, IndexingJob, IngestError, SegmentConfig,
    SplitterConfig,
};

const DIM: usize = 8;

struct FakeEmbedder;

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts
            .iter()
            .map(|t| {
                let mut v = vec![0.0f32; DIM];
                for (i, b) in t.bytes().enumerate() {
                    v[i % DIM] += b as f32;
                }
                v
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        DIM
    }

    fn batch_size(&self) -> usize {
        4
    }
}

/// Build a four-page cookbook: front matter, two pages of chicken soup,
/// one page of beef stew, with an optional two-level outline.
fn build_cookbook_pdf(path: &Path, with_outline: bool) {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let page_texts = [
        "Front matter and dedication",
        "Chicken soup: simmer the stock with herbs",
        "Chicken soup continued: season and serve",
        "Beef stew: brown the meat and braise",
    ];

    let mut page_ids = Vec::new();
    for text in page_texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        page_ids.push(page_id);
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|&id| id.into()).collect::<Vec<Object>>(),
            "Count" => page_ids.len() as i64,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };

    if with_outline {
        let dest = |page: usize| -> Object {
            vec![
                page_ids[page].into(),
                "XYZ".into(),
                Object::Null,
                Object::Null,
                Object::Null,
            ]
            .into()
        };

        let outlines_id = doc.new_object_id();
        let section_id = doc.new_object_id();
        let soup_id = doc.new_object_id();
        let stew_id = doc.new_object_id();

        doc.objects.insert(
            section_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Recipes"),
                "Parent" => outlines_id,
                "First" => soup_id,
                "Last" => stew_id,
                "Count" => 2,
                "Dest" => dest(1),
            }),
        );
        doc.objects.insert(
            soup_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Chicken Soup"),
                "Parent" => section_id,
                "Next" => stew_id,
                "Dest" => dest(1),
            }),
        );
        doc.objects.insert(
            stew_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Beef Stew"),
                "Parent" => section_id,
                "Prev" => soup_id,
                "Dest" => dest(3),
            }),
        );
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => section_id,
                "Last" => section_id,
                "Count" => 3,
            }),
        );

        catalog.set("Outlines", outlines_id);
    }

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn job(pdf_path: &Path) -> IndexingJob {
    IndexingJob {
        pdf_path: pdf_path.to_path_buf(),
        segment: SegmentConfig::new(2, 2, 4).unwrap(),
        splitter: SplitterConfig::new(200, 20).unwrap(),
        failure_policy: FailurePolicy::Abort,
    }
}

#[test]
fn extracts_all_pages_and_outline_entries() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("cookbook.pdf");
    build_cookbook_pdf(&pdf_path, true);

    let document = PdfDocument::load(&pdf_path).unwrap();

    let pages = document.extract_pages();
    assert_eq!(pages.len(), 4);
    assert_eq!(pages[0].number, 1);
    assert!(pages[1].text.contains("Chicken soup"));
    assert!(pages[3].text.contains("Beef stew"));

    let outline = document.extract_outline();
    assert_eq!(outline.len(), 3);
    assert_eq!(outline[0].level, 1);
    assert_eq!(outline[0].title, "Recipes");
    assert_eq!(outline[1].level, 2);
    assert_eq!(outline[1].title, "Chicken Soup");
    assert_eq!(outline[1].start_page, 2);
    assert_eq!(outline[2].title, "Beef Stew");
    assert_eq!(outline[2].start_page, 4);
}

#[tokio::test]
async fn full_pipeline_indexes_both_recipes() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("cookbook.pdf");
    build_cookbook_pdf(&pdf_path, true);

    let store = Arc::new(MemoryStore::new(DIM));
    let result = run_indexing(job(&pdf_path), Arc::new(FakeEmbedder), store.clone())
        .await
        .unwrap();

    assert_eq!(result.recipes, 2);
    assert!(result.fragments_indexed > 0);
    assert_eq!(result.fragments_skipped, 0);
    assert_eq!(store.count().await.unwrap(), result.fragments_indexed);
}

#[tokio::test]
async fn missing_outline_is_fatal_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("no-outline.pdf");
    build_cookbook_pdf(&pdf_path, false);

    let store = Arc::new(MemoryStore::new(DIM));
    let err = run_indexing(job(&pdf_path), Arc::new(FakeEmbedder), store.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::EmptyOutline));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn wrong_recipe_level_is_fatal_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("cookbook.pdf");
    build_cookbook_pdf(&pdf_path, true);

    let mut bad_job = job(&pdf_path);
    bad_job.segment = SegmentConfig::new(5, 2, 4).unwrap();

    let store = Arc::new(MemoryStore::new(DIM));
    let err = run_indexing(bad_job, Arc::new(FakeEmbedder), store.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::NoBoundariesAtLevel { level: 5 }));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn unreadable_document_is_a_document_access_error() {
    let store = Arc::new(MemoryStore::new(DIM));
    let err = run_indexing(
        job(Path::new("/nonexistent/cookbook.pdf")),
        Arc::new(FakeEmbedder),
        store,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, IngestError::DocumentAccess(_)));
}
