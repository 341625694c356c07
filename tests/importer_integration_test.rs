// ==========================================
// 法规条文语料库 - 导入集成测试（SQLite）
// ==========================================
// 范围: 文件 → 解析 → 校验 → 两阶段写库
// ==========================================


use legal_corpus_import::config::{config_keys, ConfigManager};
use legal_corpus_import::domain::article::ImportContext;
use legal_corpus_import::domain::types::SheetFormat;
use legal_corpus_import::importer::{
    template_headers, ArticleImporter, ArticleImporterImpl, ImportError, NoopProgressListener,
    UniversalFileParser,
};
use legal_corpus_import::repository::{ArticleImportRepository, ArticleImportRepositoryImpl};
use test_helpers::{create_test_db, csv_bytes, open_shared_connection, record, write_temp_file};

struct Fixture {
    _db_file: tempfile::NamedTempFile,
    importer: ArticleImporterImpl<ArticleImportRepositoryImpl, ConfigManager>,
    config: ConfigManager,
    kuhp_id: String,
    ite_id: String,
}

// ==========================================
// 辅助函数: 数据库 + 法规 + 历史条文 KUHP 340
// ==========================================
async fn setup() -> Fixture {
    let (db_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn = open_shared_connection(&db_path).expect("打开数据库失败");

    let repo =
        ArticleImportRepositoryImpl::from_connection(conn.clone()).expect("创建Repository失败");
    let kuhp_id = repo
        .insert_law_code("KUHP", Some("Kitab Undang-Undang Hukum Pidana"), true)
        .unwrap();
    let ite_id = repo.insert_law_code("UU-ITE", None, true).unwrap();
    repo.insert_law_code("OLD", None, false).unwrap();
    repo.create_article(&record("340", &[]), &kuhp_id, "seed")
        .await
        .unwrap();

    let importer = ArticleImporterImpl::new(
        repo,
        ConfigManager::from_connection(conn.clone()).expect("创建配置失败"),
    );
    let config = ConfigManager::from_connection(conn).expect("创建配置失败");

    Fixture {
        _db_file: db_file,
        importer,
        config,
        kuhp_id,
        ite_id,
    }
}

#[tokio::test]
async fn test_csv_import_end_to_end() {
    let fx = setup().await;
    let bytes = csv_bytes(&[
        "27,Distribusi,Isi pasal 27,,\"konten, ilegal\",KUHP,340,lihat juga,UU-ITE,28,",
        "28,Berita bohong,Isi pasal 28,Penjelasan,,,,,,,",
        "29,Lama,Isi pasal 29,,,OLD,1,,,,",
    ]);

    let result = fx
        .importer
        .import_bytes(
            &bytes,
            SheetFormat::Csv,
            &ImportContext::new("user-1", fx.ite_id.clone()),
            &NoopProgressListener,
        )
        .await
        .unwrap();

    assert_eq!(result.primary.success, 3);
    assert_eq!(result.primary.failed, 0);
    assert_eq!(result.links.success, 2);
    assert_eq!(result.links.failed, 1);
    assert!(result.partial);

    // 未启用的法规按"不存在"处理
    assert_eq!(result.links.errors[0].source, "29");
    assert_eq!(result.links.errors[0].target, "OLD 1");
    assert!(result.links.errors[0].message.contains("OLD"));

    let repo = fx.importer.repository();
    assert_eq!(repo.count_articles(&fx.ite_id).unwrap(), 3);
    assert_eq!(repo.count_articles(&fx.kuhp_id).unwrap(), 1);
    assert_eq!(repo.count_links().unwrap(), 2);

    let id_27 = repo
        .find_active_article(&fx.ite_id, "27")
        .await
        .unwrap()
        .expect("条文 27 应存在");
    assert_eq!(repo.get_keywords(&id_27).unwrap(), vec!["konten", "ilegal"]);
}

#[tokio::test]
async fn test_import_from_file() {
    let fx = setup().await;
    let file = write_temp_file(
        ".csv",
        &csv_bytes(&["362,Pencurian,Isi pasal 362,,,KUHP,340,,,,"]),
    );

    let (bytes, format) = UniversalFileParser.read_file(file.path()).unwrap();
    assert_eq!(format, SheetFormat::Csv);

    let result = fx
        .importer
        .import_bytes(
            &bytes,
            format,
            &ImportContext::new("user-1", fx.kuhp_id.clone()),
            &NoopProgressListener,
        )
        .await
        .unwrap();

    assert_eq!(result.primary.success, 1);
    assert_eq!(result.links.success, 1);
    assert!(!result.partial);
}

#[tokio::test]
async fn test_duplicate_link_fails_whole_chunk() {
    let fx = setup().await;

    let result = fx
        .importer
        .import_records(
            vec![
                record("1", &[]),
                record("2", &[("KUHP", "340"), ("KUHP", "340")]),
            ],
            &ImportContext::new("user-1", fx.ite_id.clone()),
            &NoopProgressListener,
        )
        .await
        .unwrap();

    // 条文不回滚
    assert_eq!(result.primary.success, 2);
    assert_eq!(result.links.success, 0);
    assert_eq!(result.links.failed, 2);
    assert_eq!(fx.importer.repository().count_links().unwrap(), 0);
    assert_eq!(fx.importer.repository().count_articles(&fx.ite_id).unwrap(), 2);
}

#[tokio::test]
async fn test_chunk_size_read_from_config() {
    let fx = setup().await;
    fx.config
        .set_global_config_value(config_keys::LINK_CHUNK_SIZE, "1")
        .unwrap();

    let result = fx
        .importer
        .import_records(
            vec![record("2", &[("KUHP", "340"), ("KUHP", "340")])],
            &ImportContext::new("user-1", fx.ite_id.clone()),
            &NoopProgressListener,
        )
        .await
        .unwrap();

    // 每块一条：第一条成功，重复的第二条单独失败
    assert_eq!(result.links.success, 1);
    assert_eq!(result.links.failed, 1);
    assert_eq!(fx.importer.repository().count_links().unwrap(), 1);
}

#[tokio::test]
async fn test_half_pair_in_last_link_group_rejects_file() {
    let fx = setup().await;

    // 完整模板表头（五组引用列），第 2 行仅填写 link5_targetUU
    let mut second = vec!["30", "Judul", "Isi", "", "", "KUHP", "340", ""];
    second.extend([""; 9]);
    second.extend(["KUHP", "", ""]);
    let content = format!(
        "{}\n29,Judul,Isi{}\n{}\n",
        template_headers().join(","),
        ",".repeat(17),
        second.join(",")
    );
    let bytes = content.into_bytes();

    let err = fx
        .importer
        .import_bytes(
            &bytes,
            SheetFormat::Csv,
            &ImportContext::new("user-1", fx.ite_id.clone()),
            &NoopProgressListener,
        )
        .await
        .unwrap_err();

    match err {
        ImportError::IncompleteLinkPair {
            row,
            field,
            companion,
        } => {
            assert_eq!(row, 2);
            assert_eq!(field, "link5_targetUU");
            assert_eq!(companion, "link5_targetNomor");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fx.importer.repository().count_articles(&fx.ite_id).unwrap(), 0);
}
