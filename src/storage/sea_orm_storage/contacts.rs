//! 学生联系人名录存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::student_contacts::Column;
use crate::errors::{Result, SchoolError};
use crate::models::contacts::{
    entities::{ClassLevel, StudentContact},
    requests::{CreateContactRequest, UpdateContactRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_contact_impl(
        &self,
        teacher_id: i64,
        class_level: ClassLevel,
        req: CreateContactRequest,
    ) -> Result<StudentContact> {
        let now = chrono::Utc::now().timestamp();

        let model = StudentContactActiveModel {
            teacher_id: Set(teacher_id),
            class_level: Set(class_level.to_string()),
            child_first_name: Set(req.child_first_name),
            child_last_name: Set(req.child_last_name),
            parent_name: Set(req.parent_name),
            parent_phone: Set(req.parent_phone),
            parent_email: Set(req.parent_email),
            relationship: Set(req.relationship),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建联系人", e))?;

        Ok(result.into_contact())
    }

    pub async fn get_contact_by_id_impl(&self, id: i64) -> Result<Option<StudentContact>> {
        let result = StudentContacts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询联系人", e))?;

        Ok(result.map(|m| m.into_contact()))
    }

    /// 教师自己的联系人，按孩子姓名排序
    pub async fn list_contacts_impl(
        &self,
        teacher_id: i64,
        class_level: Option<ClassLevel>,
    ) -> Result<Vec<StudentContact>> {
        let mut select = StudentContacts::find().filter(Column::TeacherId.eq(teacher_id));
        if let Some(level) = class_level {
            select = select.filter(Column::ClassLevel.eq(level.to_string()));
        }

        let models = select
            .order_by_asc(Column::ChildLastName)
            .order_by_asc(Column::ChildFirstName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询联系人列表", e))?;

        Ok(models.into_iter().map(|m| m.into_contact()).collect())
    }

    /// 每个年级的联系人数量，覆盖全部年级（无记录为 0）
    pub async fn count_contacts_by_level_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<(ClassLevel, u64)>> {
        let rows: Vec<(String, i64)> = StudentContacts::find()
            .select_only()
            .column(Column::ClassLevel)
            .column_as(Column::Id.count(), "contact_count")
            .filter(Column::TeacherId.eq(teacher_id))
            .group_by(Column::ClassLevel)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("统计联系人", e))?;

        Ok(ClassLevel::ALL
            .iter()
            .map(|level| {
                let count = rows
                    .iter()
                    .find(|(stored, _)| stored == level.as_str())
                    .map(|(_, count)| *count as u64)
                    .unwrap_or(0);
                (*level, count)
            })
            .collect())
    }

    pub async fn update_contact_impl(
        &self,
        id: i64,
        update: UpdateContactRequest,
    ) -> Result<Option<StudentContact>> {
        let Some(existing) = StudentContacts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询联系人", e))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(level) = update.class_level {
            model.class_level = Set(level.to_string());
        }
        if let Some(first) = update.child_first_name {
            model.child_first_name = Set(first);
        }
        if let Some(last) = update.child_last_name {
            model.child_last_name = Set(last);
        }
        if let Some(parent_name) = update.parent_name {
            model.parent_name = Set(parent_name);
        }
        if let Some(phone) = update.parent_phone {
            model.parent_phone = Set(phone);
        }
        if let Some(email) = update.parent_email {
            model.parent_email = Set(Some(email));
        }
        if let Some(relationship) = update.relationship {
            model.relationship = Set(Some(relationship));
        }
        if let Some(notes) = update.notes {
            model.notes = Set(Some(notes));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新联系人", e))?;

        Ok(Some(result.into_contact()))
    }

    pub async fn delete_contact_impl(&self, id: i64) -> Result<bool> {
        let result = StudentContacts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除联系人", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{memory_storage, user};
    use crate::models::contacts::entities::ClassLevel;
    use crate::models::contacts::requests::{CreateContactRequest, UpdateContactRequest};
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn contact(first: &str, last: &str) -> CreateContactRequest {
        CreateContactRequest {
            child_first_name: first.to_string(),
            child_last_name: last.to_string(),
            parent_name: "Grace Achieng".to_string(),
            parent_phone: "+254700000001".to_string(),
            parent_email: None,
            relationship: Some("Mother".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_contacts_are_private_to_teacher() {
        let storage = memory_storage().await;
        let t1 = user(&storage, "teacher1", UserRole::Teacher).await;
        let t2 = user(&storage, "teacher2", UserRole::Teacher).await;

        storage
            .create_contact(t1.id, ClassLevel::Grade3, contact("Jabari", "Odhiambo"))
            .await
            .unwrap();
        storage
            .create_contact(t1.id, ClassLevel::Grade3, contact("Achieng", "Adhiambo"))
            .await
            .unwrap();
        storage
            .create_contact(t1.id, ClassLevel::Pp1, contact("Kito", "Kariuki"))
            .await
            .unwrap();
        storage
            .create_contact(t2.id, ClassLevel::Grade3, contact("Other", "Teacher"))
            .await
            .unwrap();

        let grade3 = storage
            .list_contacts(t1.id, Some(ClassLevel::Grade3))
            .await
            .unwrap();
        let names: Vec<_> = grade3.iter().map(|c| c.child_last_name.as_str()).collect();
        assert_eq!(names, vec!["Adhiambo", "Odhiambo"]);

        let counts = storage.count_contacts_by_level(t1.id).await.unwrap();
        assert_eq!(counts.len(), ClassLevel::ALL.len());
        assert!(counts.contains(&(ClassLevel::Grade3, 2)));
        assert!(counts.contains(&(ClassLevel::Pp1, 1)));
        assert!(counts.contains(&(ClassLevel::Grade9, 0)));
    }

    #[tokio::test]
    async fn test_update_and_delete_contact() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let created = storage
            .create_contact(teacher.id, ClassLevel::Pp2, contact("Zuri", "Njeri"))
            .await
            .unwrap();

        let moved = storage
            .update_contact(
                created.id,
                UpdateContactRequest {
                    class_level: Some(ClassLevel::Grade1),
                    parent_phone: Some("+254711111111".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.class_level, ClassLevel::Grade1);
        assert_eq!(moved.parent_phone, "+254711111111");
        assert_eq!(moved.child_first_name, "Zuri");

        assert!(storage.delete_contact(created.id).await.unwrap());
        assert!(storage.get_contact_by_id(created.id).await.unwrap().is_none());
        assert!(!storage.delete_contact(created.id).await.unwrap());
    }
}
