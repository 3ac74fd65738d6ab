use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            role: Set(req.role.to_string()),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            phone_number: Set(req.phone_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建用户", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询用户", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let paginator = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::from_db("查询用户总数", e))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::from_db("查询用户列表", e))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{memory_storage, user};
    use crate::models::users::{entities::UserRole, requests::UserListQuery};
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_duplicate_username_is_uniqueness_violation() {
        let storage = memory_storage().await;
        user(&storage, "mrs_otieno", UserRole::Teacher).await;

        let err = storage
            .create_user(crate::models::users::requests::CreateUserRequest {
                username: "mrs_otieno".to_string(),
                role: UserRole::Parent,
                first_name: String::new(),
                last_name: String::new(),
                email: None,
                phone_number: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E014");
    }

    #[tokio::test]
    async fn test_list_users_filters_by_role() {
        let storage = memory_storage().await;
        user(&storage, "teacher_a", UserRole::Teacher).await;
        user(&storage, "parent_a", UserRole::Parent).await;
        user(&storage, "parent_b", UserRole::Parent).await;

        let parents = storage
            .list_users_with_pagination(UserListQuery {
                page: 1,
                size: 10,
                role: Some(UserRole::Parent),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(parents.pagination.total, 2);
        assert!(parents.items.iter().all(|u| u.role == UserRole::Parent));
    }
}
