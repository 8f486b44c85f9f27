//! Client operations: validate input, then issue one statement against the store.

use crate::db::{self, ClientStore, Param, rows};
use crate::error::{Result, StoreError, ValidationError};
use crate::models::{Client, ClientFields, ClientId};

pub struct ClientService<S> {
    store: S,
}

impl<S: ClientStore> ClientService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// All clients, in store order
    pub async fn list(&self) -> Result<Vec<Client>> {
        let records = self.store.fetch_all(db::SELECT_CLIENTS).await?;

        let clients = records
            .into_iter()
            .map(|row| {
                Client::from_object(rows::client_object(row))
                    .map_err(|e| StoreError::Decode(Box::new(e)))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(clients)
    }

    pub async fn create(&self, fields: ClientFields) -> Result<()> {
        let client = validated(Client::from_array(fields, None))?;

        self.store
            .execute(db::INSERT_CLIENT, field_params(&client))
            .await?;

        Ok(())
    }

    /// Returns the number of rows updated; an unknown id updates none.
    pub async fn update(&self, fields: ClientFields, id: ClientId) -> Result<u64> {
        let client = validated(Client::from_array(fields, Some(id)))?;

        let mut params = field_params(&client);
        params.push(Param::Id(id));
        let affected = self.store.execute(db::UPDATE_CLIENT, params).await?;

        Ok(affected)
    }

    /// Returns the number of rows deleted; an unknown id deletes none.
    pub async fn delete(&self, id: ClientId) -> Result<u64> {
        let affected = self
            .store
            .execute(db::DELETE_CLIENT, vec![Param::Id(id)])
            .await?;

        Ok(affected)
    }
}

fn validated(client: Client) -> std::result::Result<Client, ValidationError> {
    let validation = client.validate();
    if !validation.is_valid {
        return Err(ValidationError {
            errors: validation.errors,
        });
    }

    Ok(client)
}

fn field_params(client: &Client) -> Vec<Param> {
    client.to_array().into_iter().map(Param::Text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::recording::RecordingStore;
    use crate::error::ServiceError;
    use crate::models::NAME_REQUIRED;
    use serde_json::{Value, json};

    fn fields(values: [&str; 6]) -> ClientFields {
        values.map(|v| Some(v.to_string()))
    }

    fn joao() -> ClientFields {
        fields([
            "João Silva",
            "joao@example.com",
            "11999999999",
            "Rua Principal, 123",
            "Premium",
            "Ganhar massa",
        ])
    }

    fn simple() -> ClientFields {
        fields(["Name", "email@test.com", "123", "Address", "Plan", "Goal"])
    }

    fn row(value: Value) -> db::StoreRow {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn text_params(values: &ClientFields) -> Vec<Param> {
        values.iter().cloned().map(Param::Text).collect()
    }

    #[tokio::test]
    async fn list_maps_rows_to_clients() {
        let store = RecordingStore::new().with_rows(vec![
            row(json!({
                "id": 1,
                "name": "João Silva",
                "email": "joao@example.com",
                "phone": "11999999999",
                "address": "Rua Principal, 123",
                "plan": "Premium",
                "goal": "Ganhar massa"
            })),
            row(json!({
                "ID": 2,
                "NAME": "Maria Santos",
                "email": "maria@example.com",
                "phone": "11888888888",
                "address": "Avenida Central, 456",
                "plan": "Basic",
                "goal": "Perder peso"
            })),
        ]);
        let service = ClientService::new(store);

        let clients = service.list().await.unwrap();

        let statements = service.store().statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].sql, "SELECT * FROM clients");
        assert!(statements[0].params.is_empty());

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0], Client::from_array(joao(), Some(1)));
        assert_eq!(clients[1].id, Some(2));
        assert_eq!(clients[1].name.as_deref(), Some("Maria Santos"));
    }

    #[tokio::test]
    async fn list_of_empty_table_is_empty() {
        let service = ClientService::new(RecordingStore::new());

        let clients = service.list().await.unwrap();

        assert!(clients.is_empty());
        assert_eq!(service.store().statements().len(), 1);
    }

    #[tokio::test]
    async fn list_propagates_store_failure() {
        let service = ClientService::new(RecordingStore::new().failing("Database connection failed"));

        let err = service.list().await.unwrap_err();

        assert!(matches!(err, ServiceError::Store(_)));
        assert!(err.to_string().contains("Database connection failed"));
    }

    #[tokio::test]
    async fn list_rejects_mistyped_rows() {
        let store = RecordingStore::new().with_rows(vec![row(json!({ "id": "abc" }))]);
        let service = ClientService::new(store);

        let err = service.list().await.unwrap_err();

        assert!(matches!(err, ServiceError::Store(StoreError::Decode(_))));
    }

    #[tokio::test]
    async fn create_inserts_fields_in_canonical_order() {
        let service = ClientService::new(RecordingStore::new());

        service.create(joao()).await.unwrap();

        let statements = service.store().statements();
        assert_eq!(statements.len(), 1);
        let insert = &statements[0];
        assert!(insert.sql.to_uppercase().contains("INSERT INTO CLIENTS"));
        for column in crate::models::FIELD_NAMES {
            assert!(insert.sql.contains(column), "{column}");
        }
        assert_eq!(insert.params, text_params(&joao()));
        assert_eq!(insert.params[0], Param::from("João Silva"));
        assert_eq!(insert.params[5], Param::from("Ganhar massa"));
    }

    #[tokio::test]
    async fn create_with_blank_name_touches_nothing() {
        let service = ClientService::new(RecordingStore::new());
        let mut data = joao();
        data[0] = Some(String::new());

        let err = service.create(data).await.unwrap_err();

        match err {
            ServiceError::Validation(e) => assert_eq!(e.errors, vec![NAME_REQUIRED.to_string()]),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(service.store().statements().is_empty());
    }

    #[tokio::test]
    async fn create_reports_every_violation() {
        let service = ClientService::new(RecordingStore::new());

        let err = service.create(Default::default()).await.unwrap_err();

        match err {
            ServiceError::Validation(e) => assert_eq!(e.errors.len(), 6),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_propagates_store_failure() {
        let service = ClientService::new(RecordingStore::new().failing("Insert failed"));

        let err = service.create(simple()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Store(_)));
        assert!(err.to_string().contains("Insert failed"));
    }

    #[tokio::test]
    async fn update_binds_id_last() {
        let service = ClientService::new(RecordingStore::new());

        let affected = service.update(simple(), 5).await.unwrap();

        assert_eq!(affected, 1);
        let statements = service.store().statements();
        assert_eq!(statements.len(), 1);
        let update = &statements[0];
        assert!(update.sql.to_uppercase().contains("UPDATE CLIENTS"));
        assert!(update.sql.contains("WHERE id = $7"));
        assert_eq!(update.params.len(), 7);
        assert_eq!(update.params.last(), Some(&Param::Id(5)));
        assert_eq!(&update.params[..6], text_params(&simple()).as_slice());
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_an_error() {
        let service = ClientService::new(RecordingStore::new().with_affected(0));

        let affected = service.update(simple(), 999).await.unwrap();

        assert_eq!(affected, 0);
        assert_eq!(service.store().statements().len(), 1);
    }

    #[tokio::test]
    async fn update_validates_before_writing() {
        let service = ClientService::new(RecordingStore::new());
        let mut data = simple();
        data[1] = Some("not-an-email".to_string());

        let err = service.update(data, 1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid client data");
        assert!(service.store().statements().is_empty());
    }

    #[tokio::test]
    async fn update_propagates_store_failure() {
        let service = ClientService::new(RecordingStore::new().failing("Update failed"));

        let err = service.update(simple(), 1).await.unwrap_err();

        assert!(err.to_string().contains("Update failed"));
    }

    #[tokio::test]
    async fn delete_binds_only_the_id() {
        let service = ClientService::new(RecordingStore::new());

        service.delete(42).await.unwrap();

        let statements = service.store().statements();
        assert_eq!(statements.len(), 1);
        assert!(statements[0].sql.to_uppercase().contains("DELETE FROM CLIENTS"));
        assert_eq!(statements[0].params, vec![Param::Id(42)]);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_still_issues_statement() {
        let service = ClientService::new(RecordingStore::new().with_affected(0));

        let affected = service.delete(999).await.unwrap();

        assert_eq!(affected, 0);
        assert_eq!(service.store().statements().len(), 1);
    }

    #[tokio::test]
    async fn delete_propagates_store_failure() {
        let service = ClientService::new(RecordingStore::new().failing("Delete failed"));

        let err = service.delete(1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Store(_)));
    }
}
