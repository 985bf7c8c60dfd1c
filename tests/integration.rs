//! Integration tests for the vectorizar pipeline.
//!
//! These exercise end-to-end workflows: normalization through tokenization,
//! fitting, transformation and persistence.

use vectorizar::prelude::*;

fn docs(texts: &[&str]) -> Vec<Document> {
    texts.iter().map(|t| Document::new(*t)).collect()
}

#[test]
fn test_emoticon_grouping_scenario() {
    let params = TextModelParams::default().with_emoticons(EntityPolicy::Group);
    let normalized = normalize("Hi :) :P XD", &params);
    assert_eq!(normalized, "hi _pos _pos _pos");
    assert!(!normalized.contains(':'));
    assert!(!normalized.contains("xd"));
}

#[test]
fn test_skip_gram_scenario() {
    let groups = compute_token_groups(
        "el alma de la fiesta",
        &[TokenSpec::SkipGram { size: 2, skip: 1 }],
    );
    assert_eq!(groups[0], vec!["el~de", "alma~la", "de~fiesta"]);
}

#[test]
fn test_full_tokenization_with_entities() {
    let params = TextModelParams::default()
        .with_del_dup(true)
        .with_del_diac(false)
        .with_emoticons(EntityPolicy::Group)
        .with_numbers(EntityPolicy::Group)
        .with_urls(EntityPolicy::Group)
        .with_mentions(EntityPolicy::Group)
        .with_token_list(vec![
            TokenSpec::SkipGram { size: 2, skip: 1 },
            TokenSpec::SkipGram { size: 2, skip: 2 },
            TokenSpec::NGram(1),
        ]);
    let model = TextModel::new(params).unwrap();

    let text = "El alma de la fiesta :) conociendo la maquinaria @user \
                bebiendo nunca manches que onda";
    let expected = vec![
        "el~de",
        "alma~la",
        "de~fiesta",
        "la~_pos",
        "fiesta~conociendo",
        "_pos~la",
        "conociendo~maquinaria",
        "la~_usr",
        "maquinaria~bebiendo",
        "_usr~nunca",
        "bebiendo~manches",
        "nunca~que",
        "manches~onda",
        "el~la",
        "alma~fiesta",
        "de~_pos",
        "la~conociendo",
        "fiesta~la",
        "_pos~maquinaria",
        "conociendo~_usr",
        "la~bebiendo",
        "maquinaria~nunca",
        "_usr~manches",
        "bebiendo~que",
        "nunca~onda",
        "el",
        "alma",
        "de",
        "la",
        "fiesta",
        "_pos",
        "conociendo",
        "la",
        "maquinaria",
        "_usr",
        "bebiendo",
        "nunca",
        "manches",
        "que",
        "onda",
    ];
    assert_eq!(model.tokenize(text), expected);
}

#[test]
fn test_tokenize_is_deterministic_across_fit() {
    let mut model = TextModel::with_defaults();
    let text = "hola amiguitos gracias por venir :) http://hello.com @chanfle";
    let before = model.tokenize(text);
    model
        .fit(&docs(&["hola amigos", "gracias por todo", "nos vemos"]))
        .unwrap();
    assert_eq!(model.tokenize(text), before);
}

#[test]
fn test_min_filter_removes_singletons() {
    // min_filter = 1 (absolute) keeps only tokens present in 2+ documents
    let params = TextModelParams::default().with_min_filter(TokenFilter::Count(1));
    let mut model = TextModel::new(params).unwrap();
    model
        .fit(&docs(&[
            "buenos dias amigos",
            "excelente dia amigos",
            "buenos y excelente humor",
        ]))
        .unwrap();
    // df: buenos=2, amigos=2, excelente=2; everything else appears once
    assert_eq!(model.num_terms(), 3);

    let space = model.vector_space().unwrap();
    assert!(space.vocabulary().id("dias").is_none());
    assert!(space.vocabulary().id("buenos").is_some());
}

#[test]
fn test_vocabulary_ids_span_range() {
    let mut model = TextModel::with_defaults();
    model
        .fit(&docs(&["a b c", "a b", "a d e f"]))
        .unwrap();
    let vocab = model.vector_space().unwrap().vocabulary();
    let mut ids: Vec<usize> = vocab.iter().map(|(_, id)| id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..vocab.len()).collect::<Vec<_>>());
}

#[test]
fn test_tfidf_vectors_l2_normalized() {
    let mut model = TextModel::with_defaults();
    let corpus = docs(&[
        "buenos dias amigos",
        "excelente dia",
        "buenas tardes",
        "las vacas me deprimen",
        "odio los lunes",
        "odio el trafico",
        "la computadora",
        "la mesa",
        "la ventana",
    ]);
    model.fit(&corpus).unwrap();

    for doc in &corpus {
        let v = model.vector(&doc.text).unwrap();
        if !v.is_empty() {
            let norm: f64 = v.iter().map(|(_, s)| s * s).sum();
            assert!((norm - 1.0).abs() < 1e-9, "norm^2 = {norm}");
        }
        let mut ids: Vec<usize> = v.iter().map(|&(id, _)| id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), v.len(), "ids must be unique");
    }

    // a document with no known tokens yields an empty vector, not an error
    assert!(model.vector("zzz qqq").unwrap().is_empty());
}

#[test]
fn test_entropy_end_to_end() {
    let params = TextModelParams::default().with_weighting(WeightingScheme::Entropy);
    let mut model = TextModel::new(params).unwrap();
    let corpus = vec![
        Document::new("buenos dias").with_klass("pos"),
        Document::new("excelente dia").with_klass("pos"),
        Document::new("odio los lunes").with_klass("neg"),
        Document::new("odio el trafico").with_klass("neg"),
    ];
    model.fit(&corpus).unwrap();

    let space = model.vector_space().unwrap();
    for id in 0..space.num_terms() {
        let w = space.weight(id).unwrap();
        assert!((0.0..=1.0).contains(&w), "weight {w} out of range");
    }
    // "odio" only occurs in the negative class: fully discriminative
    let odio = space.vocabulary().id("odio").unwrap();
    assert!((space.weight(odio).unwrap() - 1.0).abs() < 1e-12);

    // scores are weights directly
    let v = model.vector("odio los lunes").unwrap();
    for &(id, score) in &v {
        assert_eq!(score, space.weight(id).unwrap());
    }
}

#[test]
fn test_model_persistence_round_trip() {
    let params = TextModelParams::default()
        .with_emoticons(EntityPolicy::Group)
        .with_token_list(vec![
            TokenSpec::NGram(1),
            TokenSpec::NGram(2),
            TokenSpec::QGram(3),
        ]);
    let mut model = TextModel::new(params).unwrap();
    model
        .fit(&docs(&[
            "buenos dias :)",
            "excelente dia",
            "odio los lunes",
            "la computadora nueva",
        ]))
        .unwrap();

    let path = std::env::temp_dir().join(format!("vectorizar-rt-{}.model", std::process::id()));
    save_model(&model, &path).expect("save should succeed");
    let restored = load_model(&path).expect("load should succeed");
    std::fs::remove_file(&path).ok();

    for text in [
        "buenos dias :)",
        "un documento nunca visto durante el ajuste",
        "",
    ] {
        assert_eq!(model.tokenize(text), restored.tokenize(text));
        assert_eq!(model.vector(text).unwrap(), restored.vector(text).unwrap());
    }
}

#[test]
fn test_json_lines_to_model() {
    let data = br#"{"text": "buenos dias :)", "klass": "pos"}
{"text": "excelente dia", "klass": "pos"}
{"text": "odio los lunes", "klass": "neg"}
"#;
    let corpus: Vec<Document> = Records::new(&data[..], FieldMap::default())
        .collect::<Result<Vec<_>>>()
        .expect("decode should succeed");
    assert_eq!(corpus.len(), 3);

    let params = TextModelParams::default().with_weighting(WeightingScheme::Entropy);
    let mut model = TextModel::new(params).unwrap();
    model.fit(&corpus).expect("fit should succeed");
    assert!(model.num_terms() > 0);
}

#[test]
fn test_degenerate_inputs_are_valid() {
    let mut model = TextModel::with_defaults();
    model.fit(&[]).expect("empty corpus fits");
    assert_eq!(model.num_terms(), 0);
    assert!(model.vector("anything").unwrap().is_empty());
    assert!(model.tokenize("").is_empty());
}
