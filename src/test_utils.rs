//! 测试辅助：内存数据库与种子数据

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};

use crate::entity::prelude::{AssignmentActiveModel, PrincipalActiveModel};
use crate::models::assignments::entities::{Assignment, AssignmentState, Grade};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;

/// 创建已迁移的内存 SQLite 存储
pub async fn setup_test_storage() -> SeaOrmStorage {
    // 内存库只能存在于单个连接中
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("Failed to connect to in-memory db");

    SeaOrmStorage::from_connection(db)
        .await
        .expect("Failed to run migrations")
}

pub fn shared(storage: SeaOrmStorage) -> Arc<dyn Storage> {
    Arc::new(storage)
}

pub async fn seed_principal(storage: &SeaOrmStorage, id: &str, user_id: &str) {
    let now = chrono::Utc::now().timestamp();
    PrincipalActiveModel {
        id: Set(id.to_string()),
        user_id: Set(user_id.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&storage.db)
    .await
    .expect("Failed to seed principal");
}

pub async fn seed_assignment(
    storage: &SeaOrmStorage,
    state: AssignmentState,
    teacher_id: Option<&str>,
    grade: Option<Grade>,
) -> Assignment {
    insert_assignment(storage, None, state, teacher_id, grade).await
}

/// 以指定 ID 写入作业
pub async fn seed_assignment_with_id(
    storage: &SeaOrmStorage,
    id: i64,
    state: AssignmentState,
    teacher_id: Option<&str>,
) -> Assignment {
    insert_assignment(storage, Some(id), state, teacher_id, None).await
}

async fn insert_assignment(
    storage: &SeaOrmStorage,
    id: Option<i64>,
    state: AssignmentState,
    teacher_id: Option<&str>,
    grade: Option<Grade>,
) -> Assignment {
    let now = chrono::Utc::now().timestamp();
    let mut model = AssignmentActiveModel {
        content: Set(Some(format!("{} work", state.as_str().to_lowercase()))),
        state: Set(state.to_string()),
        student_id: Set("s1".to_string()),
        teacher_id: Set(teacher_id.map(str::to_string)),
        grade: Set(grade.map(|g| g.to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    if let Some(id) = id {
        model.id = Set(id);
    }

    model
        .insert(&storage.db)
        .await
        .expect("Failed to seed assignment")
        .into_assignment()
}
