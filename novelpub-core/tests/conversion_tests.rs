//! Conversion tests for novelpub-core
//!
//! These run whole manuscripts through decoding, editing and EPUB encoding,
//! then open the generated archive to check what a reader would see.

use novelpub_core::decoder::{
    decoder_for_extension, normalize, read_text_file, resolve, segment, EncodingChoice,
    SequentialIdGenerator, TxtDecoder,
};
use novelpub_core::encoder::{encoder_for_format, EpubEncoder, Encoder, ParagraphPolicy};
use novelpub_core::{edit, Book, BookMeta, Cover, Language};
use std::io::{Cursor, Read};
use std::sync::Arc;

const NOVEL_ZH: &str = "书名：测试小说\n作者：测试作者\n\n\
第一章 山雨欲来\n\u{3000}\u{3000}天色渐渐暗了下来，他推开门走进了院子。\n\u{3000}\u{3000}院子里空无一人。\n\n\
第二章 风满楼\n\u{3000}\u{3000}风越刮越大，窗纸被吹得哗哗作响。\n\
第3章：夜\n\u{3000}\u{3000}这一夜，谁也没有睡着。\n";

/// All entries of an EPUB archive as (name, text) pairs
fn read_epub(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip archive");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).expect("readable entry");
            let mut content = Vec::new();
            file.read_to_end(&mut content).expect("readable content");
            (
                file.name().to_string(),
                String::from_utf8_lossy(&content).into_owned(),
            )
        })
        .collect()
}

fn entry<'a>(entries: &'a [(String, String)], suffix: &str) -> &'a str {
    entries
        .iter()
        .find(|(name, _)| name.ends_with(suffix))
        .map(|(_, content)| content.as_str())
        .unwrap_or_else(|| panic!("missing entry {}", suffix))
}

fn encode(book: &Book, encoder: &EpubEncoder) -> Vec<u8> {
    let mut output = Vec::new();
    encoder.encode(book, &mut output).expect("encoding succeeds");
    output
}

#[test]
fn test_no_heading_scenario() {
    let lines = vec!["这是第一行".to_string(), "这是第二行".to_string()];
    let chapters = segment(&lines, Language::ZhCn);

    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].title, "正文");
    assert_eq!(chapters[0].lines, lines);
}

#[test]
fn test_full_width_crlf_normalization_scenario() {
    let raw = "\u{3000}\u{3000}第1章 开始\r\n\u{3000}\u{3000}正文第一段。  \r\n\r\n  \u{3000}正文第二段。\r\n";
    let lines = normalize(raw);

    assert_eq!(lines, vec!["第1章 开始", "正文第一段。", "", "正文第二段。", ""]);

    let chapters = segment(&lines, Language::ZhCn);
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].title, "第1章 开始");
    assert_eq!(chapters[0].lines, vec!["正文第一段。", "", "正文第二段。", ""]);
}

#[test]
fn test_gbk_manuscript_to_epub() {
    let (bytes, _, _) = encoding_rs::GBK.encode(NOVEL_ZH);

    let decoder = TxtDecoder::new()
        .with_meta(BookMeta::new("测试小说", Language::ZhCn).with_author("测试作者"))
        .with_id_generator(Arc::new(SequentialIdGenerator::default()));
    let (book, read) = decoder.decode_bytes(&bytes);

    assert_eq!(read.detected_encoding, "gb18030");
    assert_eq!(read.used_encoding, "gb18030");

    let titles: Vec<&str> = book.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["简介", "第一章 山雨欲来", "第二章 风满楼", "第3章：夜"]);
    assert!(book.chapters[0].is_intro);

    let entries = read_epub(&encode(&book, &EpubEncoder::new()));
    assert_eq!(entry(&entries, "mimetype"), "application/epub+zip");
    assert_eq!(entries[0].0, "mimetype");

    let chapter_two = entry(&entries, "chapter_2.xhtml");
    assert!(chapter_two.contains("<h1>第一章 山雨欲来</h1>"));
    assert!(chapter_two.contains("<p>天色渐渐暗了下来，他推开门走进了院子。</p>"));
    assert_eq!(chapter_two.matches("<p>").count(), 2);

    let opf = entry(&entries, ".opf");
    assert!(opf.contains("测试小说"));
    assert!(opf.contains("测试作者"));
    assert!(opf.contains("zh-CN"));

    let nav = entry(&entries, "nav.xhtml");
    assert!(nav.contains("第3章：夜"));
}

#[test]
fn test_edits_before_encoding() {
    let decoder = TxtDecoder::new()
        .with_meta(BookMeta::new("Edited", Language::ZhCn))
        .with_id_generator(Arc::new(SequentialIdGenerator::default()));
    let mut book = decoder.decode_text(NOVEL_ZH);

    let second = book.chapters[2].id.clone();
    let third = book.chapters[3].id.clone();
    book.chapters = edit::rename(&book.chapters, &second, "第二章 改名");
    book.chapters = edit::merge_with_previous(&book.chapters, &third);

    assert_eq!(book.chapters.len(), 3);
    assert_eq!(book.chapters[2].title, "第二章 改名");
    assert_eq!(
        book.chapters[2].lines,
        vec!["风越刮越大，窗纸被吹得哗哗作响。", "这一夜，谁也没有睡着。", ""]
    );

    let entries = read_epub(&encode(&book, &EpubEncoder::new()));
    assert!(entries.iter().all(|(name, _)| !name.ends_with("chapter_4.xhtml")));
    assert!(entry(&entries, "chapter_3.xhtml").contains("第二章 改名"));
}

#[test]
fn test_merge_runs_paragraph_policy() {
    let book = TxtDecoder::new()
        .with_meta(BookMeta::new("Runs", Language::En))
        .decode_text("Chapter 1\nIt was\na dark night.\n\nThen morning.");

    let encoder = EpubEncoder::new().with_paragraph_policy(ParagraphPolicy::MergeRuns);
    let entries = read_epub(&encode(&book, &encoder));
    let chapter = entry(&entries, "chapter_1.xhtml");

    assert!(chapter.contains("<p>It was a dark night.</p>"));
    assert!(chapter.contains("<p>Then morning.</p>"));
}

#[test]
fn test_cover_is_embedded() {
    let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    let book = TxtDecoder::new()
        .with_meta(BookMeta::new("Cover", Language::En))
        .with_cover(Cover::new(png.clone(), "image/png", "cover.png"))
        .decode_text("Just one chapter.");

    let mut output = Vec::new();
    EpubEncoder::new().encode(&book, &mut output).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(output)).unwrap();
    let name = archive
        .file_names()
        .find(|name| name.ends_with("images/cover.png"))
        .map(str::to_string)
        .expect("cover entry");
    let mut data = Vec::new();
    archive.by_name(&name).unwrap().read_to_end(&mut data).unwrap();
    assert_eq!(data, png);
}

#[test]
fn test_registry_lookups_drive_pipeline() {
    let decoder = decoder_for_extension("txt").expect("txt decoder");
    let encoder = encoder_for_format("epub").expect("epub encoder");

    let mut reader = Cursor::new("Chapter 1\nHello\nChapter 2\nWorld".as_bytes().to_vec());
    let book = decoder.decode(&mut reader).unwrap();
    assert_eq!(book.chapters.len(), 2);

    let mut output = Vec::new();
    encoder.encode(&book, &mut output).unwrap();
    assert_eq!(encoder.file_extension(), "epub");
    assert!(!output.is_empty());
}

#[test]
fn test_empty_manuscript_still_encodes() {
    let read = resolve(&[], &EncodingChoice::Auto);
    let book = TxtDecoder::new()
        .with_meta(BookMeta::new("", Language::ZhCn))
        .decode_text(&read.text);

    assert_eq!(book.chapters.len(), 1);
    assert_eq!(book.chapters[0].title, "正文");

    let entries = read_epub(&encode(&book, &EpubEncoder::new()));
    assert!(entry(&entries, ".opf").contains("未命名"));
}

#[tokio::test]
async fn test_read_text_file_then_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("novel.txt");
    std::fs::write(&path, NOVEL_ZH).unwrap();

    let read = read_text_file(&path, &EncodingChoice::Auto).await.unwrap();
    assert_eq!(read.used_encoding, "utf-8");

    let book = TxtDecoder::new().decode_text(&read.text);
    assert!(book.chapters.iter().any(|c| c.title.contains("第一章")));
}
