use std::sync::Arc;

use chatmor::{
    annotate::{AnnotationOptions, CommaStyle},
    batch,
    components::{
        tagger::{LexiconTagger, Resources, TaggerConfig},
        tokenizer::ChatTokenizer,
        Component,
    },
    config::Config,
    corrections::{correct_stream, Corrector},
    normalize::normalize,
    pipeline::Annotator,
};
use lazy_static::lazy_static;
use quickcheck_macros::quickcheck;

fn lexicon() -> LexiconTagger {
    LexiconTagger::from_entries(vec![
        ("toho", "ten", "PDZS2----------"),
        ("vybarvování", "vybarvování", "NNNS2-----A----"),
        ("koupu", "koupat", "VB-S---1P-AAI--"),
        ("vodě", "voda", "NNFS6-----A----"),
        ("Mařenku", "Mařenka", "NNFS4-----A----"),
        ("rád", "rád", "ACYS------A----"),
        ("mám", "mít", "VB-S---1P-AAI--"),
        ("přišel", "přijít", "VpYS---XR-AAP--"),
        ("jsi", "být", "VB-S---2P-AAI--"),
        ("domů", "domů", "Db-------------"),
        ("řekl", "říci", "VpYS---XR-AAP--"),
        ("je", "být", "VB-S---3P-AAI--"),
        ("tady", "tady", "Db-------------"),
    ])
}

fn annotator(options: AnnotationOptions) -> Annotator {
    Annotator::new(ChatTokenizer.into(), Arc::new(lexicon().into()), false, options)
}

lazy_static! {
    static ref ANNOTATOR: Annotator = annotator(AnnotationOptions::default());
}

fn mor(line: &str) -> Option<String> {
    ANNOTATOR.process_line(line).unwrap().mor
}

#[test]
fn fragment_is_removed() {
    assert_eq!(
        normalize("*CHI:\ttoho &vybavová vybarvování.").unwrap().unwrap().as_str(),
        "toho vybarvování ."
    );
    assert_eq!(
        mor("*CHI:\ttoho &vybavová vybarvování.").as_deref(),
        Some("%mor:\tpro:dem|ten-2&SG&x_jmenny_rod n|vybarvování-2&SG&N .")
    );
}

#[test]
fn omitted_words_are_removed() {
    assert_eq!(
        normalize("*MOT:\tkoupu 0se 0ve vodě .").unwrap().unwrap().as_str(),
        "koupu vodě ."
    );
}

#[test]
fn proper_noun() {
    assert_eq!(
        mor("*MOT:\tMařenku .").as_deref(),
        Some("%mor:\tn:prop|Mařenka-4&SG&F .")
    );
}

#[test]
fn full_word_override() {
    assert_eq!(
        mor("*CHI:\trád to mám .").as_deref(),
        Some("%mor:\tadj:short|rád-1&SG&M x|to v:x|mít-1&SG&ind&pres&akt&impf .")
    );
}

#[test]
fn skipped_line_is_only_echoed() {
    let output = ANNOTATOR.process_line("*CHI:\txxx .").unwrap();

    assert_eq!(output.line, "*CHI:\txxx .");
    assert_eq!(output.mor, None);
    assert_eq!(output.to_string(), "*CHI:\txxx .\n");
}

#[test]
fn replacement_is_annotated() {
    assert_eq!(
        mor("*CHI:\tpřišels [:přišel jsi] domů.").as_deref(),
        Some("%mor:\tv|přijít-SG&past&akt&M&pf v:x|být-2&SG&ind&pres&akt&impf adv|domů .")
    );
}

#[test]
fn quotation_marks_are_not_annotated() {
    let mor = mor("*MOT:\třekl “Mařenku” .").unwrap();

    assert_eq!(mor, "%mor:\tv|říci-SG&past&akt&M&pf n|Mařenka-4&SG&F .");
    assert!(!mor.contains('“') && !mor.contains('”'));
}

#[test]
fn copula_and_commas() {
    assert_eq!(
        mor("*CHI:\tje , tady .").as_deref(),
        Some("%mor:\tv:cop|být-3&SG&ind&pres&akt&impf cm|cm adv:pro|tady .")
    );

    let annotator = annotator(AnnotationOptions {
        comma: CommaStyle::Verbatim,
    });
    assert_eq!(
        annotator.process_line("*CHI:\tje , tady .").unwrap().mor.as_deref(),
        Some("%mor:\tv:cop|být-3&SG&ind&pres&akt&impf , adv:pro|tady .")
    );
}

#[test]
fn verbatim_comma_tiers_can_be_corrected() {
    let annotator = annotator(AnnotationOptions {
        comma: CommaStyle::Verbatim,
    });
    let mut annotated = Vec::new();
    annotator
        .annotate_stream("*CHI:\tje , tady .\n".as_bytes(), &mut annotated)
        .unwrap();

    let mut corrected = Vec::new();
    correct_stream(
        annotated.as_slice(),
        &mut corrected,
        &[Corrector::Vcop, Corrector::PeopleLemma],
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(corrected).unwrap(),
        "*CHI:\tje , tady .\n%mor:\tv:cop|být-3&SG&ind&pres&akt&impf , adv:pro|tady .\n"
    );
}

#[test]
fn skip_list() {
    for line in &["*CHI:\t.", "*CHI:\t0 .", "*CHI:\tNee .", "*CHI:\temem .", "*CHI:\t+..."] {
        assert_eq!(mor(line), None, "{}", line);
    }
}

#[test]
fn transcript() {
    let input = "@Begin\n@Participants:\tCHI Target_Child\n*CHI:\tje tady .\n%com:\tpoznámka\n*CHI:\t<je> [/] je tady.\n*CHI:\tje {tady} .\n@End\n";
    let mut output = Vec::new();

    let report = ANNOTATOR.annotate_stream(input.as_bytes(), &mut output).unwrap();

    assert_eq!(report.lines, 7);
    assert_eq!(report.annotated, 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "@Begin\n@Participants:\tCHI Target_Child\n\
         *CHI:\tje tady .\n%mor:\tv:cop|být-3&SG&ind&pres&akt&impf adv:pro|tady .\n\
         %com:\tpoznámka\n\
         *CHI:\t<je> [/] je tady.\n%mor:\tv:cop|být-3&SG&ind&pres&akt&impf adv:pro|tady .\n\
         *CHI:\tje {tady} .\n@End\n"
    );
}

#[test]
fn annotates_directory_with_compiled_lexicon() {
    let dir = tempfile::tempdir().unwrap();
    let lexicon_path = dir.path().join("cs.bin");
    lexicon()
        .to_writer(fs_err::File::create(&lexicon_path).unwrap())
        .unwrap();

    let indir = dir.path().join("in");
    fs_err::create_dir_all(indir.join("a")).unwrap();
    fs_err::write(indir.join("a/one.txt"), "*CHI:\tje tady .\n").unwrap();
    fs_err::write(indir.join("two.txt"), "*CHI:\tje {tady} .\n").unwrap();

    let config = Config {
        tagger: TaggerConfig::Lexicon { path: lexicon_path },
        ..Config::default()
    };
    let annotator = Annotator::from_config(&config, &Resources::new()).unwrap();

    let outdir = dir.path().join("out");
    let jobs = batch::jobs_from_dir(&indir, &outdir, &["txt"]).unwrap();
    let report = batch::run(&jobs, |reader, writer| {
        Ok(annotator.annotate_stream(reader, writer)?.errors.len())
    })
    .unwrap();

    assert_eq!(report.exit_code(), 1);
    assert_eq!(
        fs_err::read_to_string(outdir.join("a/one.txt")).unwrap(),
        "*CHI:\tje tady .\n%mor:\tv:cop|být-3&SG&ind&pres&akt&impf adv:pro|tady .\n"
    );
    assert_eq!(
        fs_err::read_to_string(outdir.join("two.txt")).unwrap(),
        "*CHI:\tje {tady} .\n"
    );
}

#[test]
fn unreadable_file_does_not_stop_batch() {
    let dir = tempfile::tempdir().unwrap();
    let indir = dir.path().join("in");
    fs_err::create_dir_all(&indir).unwrap();
    fs_err::write(indir.join("a_broken.txt"), b"*CHI:\tje \xe8 .\n".as_ref()).unwrap();
    fs_err::write(indir.join("b_good.txt"), "*CHI:\tje tady .\n").unwrap();

    let outdir = dir.path().join("out");
    let jobs = batch::jobs_from_dir(&indir, &outdir, &["txt"]).unwrap();
    let report = batch::run(&jobs, |reader, writer| {
        Ok(ANNOTATOR.annotate_stream(reader, writer)?.errors.len())
    })
    .unwrap();

    assert!(matches!(report.files[0].1, batch::FileOutcome::Failed(_)));
    assert_eq!(report.files[1].1, batch::FileOutcome::Success);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(
        fs_err::read_to_string(outdir.join("b_good.txt")).unwrap(),
        "*CHI:\tje tady .\n%mor:\tv:cop|být-3&SG&ind&pres&akt&impf adv:pro|tady .\n"
    );
}

#[quickcheck]
fn can_annotate_anything(text: String) -> bool {
    let _ = ANNOTATOR.process_line(&format!("*CHI:\t{}", text));
    true
}

#[quickcheck]
fn mor_tier_has_no_quotation_marks(words: Vec<String>) -> bool {
    let line = format!("*CHI:\t“{}” .", words.join(" "));

    match ANNOTATOR.process_line(&line) {
        Ok(output) => output
            .mor
            .map_or(true, |mor| !mor.contains(" “") && !mor.contains(" ”")),
        Err(_) => true,
    }
}
