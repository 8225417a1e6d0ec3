//! Fixture entities with hand-written proxies, shaped the way generated
//! code would be.
//!
//! ```text
//! Blog ──topic──▶ Topic ──author──▶ SysUser
//!  │ ▲              │
//!  │ └───blogs──────┘
//!  ├──comments──▶ Comment
//!  └──tags (via BlogTag)──▶ Tag
//! ```

use entiq::{
    schema::{self, LogicalDelete, ManyToMany, Navigation},
    stmt::{Record, Type, Value},
    Column, Entity, EntityProxy, Primitive, Result, TableHandle,
};

fn field<T: Primitive>(record: &mut Record, index: usize) -> Result<T> {
    T::load(record.take(index))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub star: i32,
    pub score: f64,
    pub status: i32,
    pub topic_id: String,
    pub deleted: bool,
}

#[derive(Clone)]
pub struct BlogProxy {
    table: TableHandle,
}

impl Entity for Blog {
    const NAME: &'static str = "Blog";

    type Proxy = BlogProxy;

    fn metadata() -> schema::Entity {
        schema::Entity::new(Self::NAME)
            .column(schema::Column::new("id", Type::String).primary_key())
            .column(schema::Column::new("title", Type::String))
            .column(schema::Column::new("content", Type::String).nullable())
            .column(schema::Column::new("star", Type::I32))
            .column(schema::Column::new("score", Type::F64))
            .column(schema::Column::new("status", Type::I32))
            .column(schema::Column::new("topic_id", Type::String))
            .column(schema::Column::new("deleted", Type::Bool))
            .navigation(Navigation::many_to_one("topic", "Topic", "topic_id", "id"))
            .navigation(Navigation::one_to_many("comments", "Comment", "id", "blog_id"))
            .navigation(Navigation::many_to_many(
                "tags",
                "Tag",
                "id",
                "id",
                ManyToMany::new("BlogTag", "blog_id", "tag_id"),
            ))
            .logical_delete(LogicalDelete::boolean("deleted"))
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Blog {
            id: field(&mut record, 0)?,
            title: field(&mut record, 1)?,
            content: field(&mut record, 2)?,
            star: field(&mut record, 3)?,
            score: field(&mut record, 4)?,
            status: field(&mut record, 5)?,
            topic_id: field(&mut record, 6)?,
            deleted: field(&mut record, 7)?,
        })
    }

    fn record(&self) -> Record {
        Record::from_vec(vec![
            self.id.clone().into(),
            self.title.clone().into(),
            self.content.clone().into(),
            self.star.into(),
            self.score.into(),
            self.status.into(),
            self.topic_id.clone().into(),
            self.deleted.into(),
        ])
    }
}

impl EntityProxy for BlogProxy {
    type Entity = Blog;

    fn from_table(table: TableHandle) -> Self {
        BlogProxy { table }
    }

    fn table(&self) -> &TableHandle {
        &self.table
    }
}

impl BlogProxy {
    pub fn id(&self) -> Column<String> {
        self.table.column("id")
    }

    pub fn title(&self) -> Column<String> {
        self.table.column("title")
    }

    pub fn content(&self) -> Column<Option<String>> {
        self.table.column("content")
    }

    pub fn star(&self) -> Column<i32> {
        self.table.column("star")
    }

    pub fn score(&self) -> Column<f64> {
        self.table.column("score")
    }

    pub fn status(&self) -> Column<i32> {
        self.table.column("status")
    }

    pub fn topic_id(&self) -> Column<String> {
        self.table.column("topic_id")
    }

    pub fn deleted(&self) -> Column<bool> {
        self.table.column("deleted")
    }

    pub fn topic(&self) -> TopicProxy {
        self.table.navigate("topic")
    }

    pub fn comments(&self) -> CommentProxy {
        self.table.navigate("comments")
    }

    pub fn tags(&self) -> TagProxy {
        self.table.navigate("tags")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub stars: i32,
    pub author_id: Option<i64>,
}

#[derive(Clone)]
pub struct TopicProxy {
    table: TableHandle,
}

impl Entity for Topic {
    const NAME: &'static str = "Topic";

    type Proxy = TopicProxy;

    fn metadata() -> schema::Entity {
        schema::Entity::new(Self::NAME)
            .table_name("t_topic")
            .column(schema::Column::new("id", Type::String).primary_key())
            .column(schema::Column::new("title", Type::String))
            .column(schema::Column::new("stars", Type::I32))
            .column(schema::Column::new("author_id", Type::I64).nullable())
            .navigation(Navigation::one_to_many("blogs", "Blog", "id", "topic_id"))
            .navigation(Navigation::many_to_one("author", "SysUser", "author_id", "id"))
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Topic {
            id: field(&mut record, 0)?,
            title: field(&mut record, 1)?,
            stars: field(&mut record, 2)?,
            author_id: field(&mut record, 3)?,
        })
    }

    fn record(&self) -> Record {
        Record::from_vec(vec![
            self.id.clone().into(),
            self.title.clone().into(),
            self.stars.into(),
            self.author_id.into(),
        ])
    }
}

impl EntityProxy for TopicProxy {
    type Entity = Topic;

    fn from_table(table: TableHandle) -> Self {
        TopicProxy { table }
    }

    fn table(&self) -> &TableHandle {
        &self.table
    }
}

impl TopicProxy {
    pub fn id(&self) -> Column<String> {
        self.table.column("id")
    }

    pub fn title(&self) -> Column<String> {
        self.table.column("title")
    }

    pub fn stars(&self) -> Column<i32> {
        self.table.column("stars")
    }

    pub fn author_id(&self) -> Column<Option<i64>> {
        self.table.column("author_id")
    }

    pub fn blogs(&self) -> BlogProxy {
        self.table.navigate("blogs")
    }

    pub fn author(&self) -> SysUserProxy {
        self.table.navigate("author")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub blog_id: String,
    pub content: String,
}

#[derive(Clone)]
pub struct CommentProxy {
    table: TableHandle,
}

impl Entity for Comment {
    const NAME: &'static str = "Comment";

    type Proxy = CommentProxy;

    fn metadata() -> schema::Entity {
        schema::Entity::new(Self::NAME)
            .column(schema::Column::new("id", Type::String).primary_key())
            .column(schema::Column::new("blog_id", Type::String))
            .column(schema::Column::new("content", Type::String))
            .navigation(Navigation::many_to_one("blog", "Blog", "blog_id", "id"))
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Comment {
            id: field(&mut record, 0)?,
            blog_id: field(&mut record, 1)?,
            content: field(&mut record, 2)?,
        })
    }

    fn record(&self) -> Record {
        Record::from_vec(vec![
            self.id.clone().into(),
            self.blog_id.clone().into(),
            self.content.clone().into(),
        ])
    }
}

impl EntityProxy for CommentProxy {
    type Entity = Comment;

    fn from_table(table: TableHandle) -> Self {
        CommentProxy { table }
    }

    fn table(&self) -> &TableHandle {
        &self.table
    }
}

impl CommentProxy {
    pub fn id(&self) -> Column<String> {
        self.table.column("id")
    }

    pub fn blog_id(&self) -> Column<String> {
        self.table.column("blog_id")
    }

    pub fn content(&self) -> Column<String> {
        self.table.column("content")
    }

    pub fn blog(&self) -> BlogProxy {
        self.table.navigate("blog")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Clone)]
pub struct TagProxy {
    table: TableHandle,
}

impl Entity for Tag {
    const NAME: &'static str = "Tag";

    type Proxy = TagProxy;

    fn metadata() -> schema::Entity {
        schema::Entity::new(Self::NAME)
            .column(schema::Column::new("id", Type::String).primary_key())
            .column(schema::Column::new("name", Type::String))
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Tag {
            id: field(&mut record, 0)?,
            name: field(&mut record, 1)?,
        })
    }

    fn record(&self) -> Record {
        Record::from_vec(vec![self.id.clone().into(), self.name.clone().into()])
    }
}

impl EntityProxy for TagProxy {
    type Entity = Tag;

    fn from_table(table: TableHandle) -> Self {
        TagProxy { table }
    }

    fn table(&self) -> &TableHandle {
        &self.table
    }
}

impl TagProxy {
    pub fn id(&self) -> Column<String> {
        self.table.column("id")
    }

    pub fn name(&self) -> Column<String> {
        self.table.column("name")
    }
}

/// Mapping entity of `Blog.tags`, keyed by both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogTag {
    pub blog_id: String,
    pub tag_id: String,
    pub weight: i32,
}

#[derive(Clone)]
pub struct BlogTagProxy {
    table: TableHandle,
}

impl Entity for BlogTag {
    const NAME: &'static str = "BlogTag";

    type Proxy = BlogTagProxy;

    fn metadata() -> schema::Entity {
        schema::Entity::new(Self::NAME)
            .column(schema::Column::new("blog_id", Type::String).primary_key())
            .column(schema::Column::new("tag_id", Type::String).primary_key())
            .column(schema::Column::new("weight", Type::I32))
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(BlogTag {
            blog_id: field(&mut record, 0)?,
            tag_id: field(&mut record, 1)?,
            weight: field(&mut record, 2)?,
        })
    }

    fn record(&self) -> Record {
        Record::from_vec(vec![
            self.blog_id.clone().into(),
            self.tag_id.clone().into(),
            self.weight.into(),
        ])
    }
}

impl EntityProxy for BlogTagProxy {
    type Entity = BlogTag;

    fn from_table(table: TableHandle) -> Self {
        BlogTagProxy { table }
    }

    fn table(&self) -> &TableHandle {
        &self.table
    }
}

impl BlogTagProxy {
    pub fn blog_id(&self) -> Column<String> {
        self.table.column("blog_id")
    }

    pub fn tag_id(&self) -> Column<String> {
        self.table.column("tag_id")
    }

    pub fn weight(&self) -> Column<i32> {
        self.table.column("weight")
    }
}

/// A user with a timestamp-style soft-delete marker.
#[derive(Debug, Clone, PartialEq)]
pub struct SysUser {
    pub id: i64,
    pub name: String,
    pub deleted_at: Option<i64>,
}

#[derive(Clone)]
pub struct SysUserProxy {
    table: TableHandle,
}

impl Entity for SysUser {
    const NAME: &'static str = "SysUser";

    type Proxy = SysUserProxy;

    fn metadata() -> schema::Entity {
        schema::Entity::new(Self::NAME)
            .column(schema::Column::new("id", Type::I64).primary_key())
            .column(schema::Column::new("name", Type::String))
            .column(schema::Column::new("deleted_at", Type::I64).nullable())
            .logical_delete(LogicalDelete::timestamp("deleted_at"))
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(SysUser {
            id: field(&mut record, 0)?,
            name: field(&mut record, 1)?,
            deleted_at: field(&mut record, 2)?,
        })
    }

    fn record(&self) -> Record {
        Record::from_vec(vec![
            self.id.into(),
            self.name.clone().into(),
            self.deleted_at.into(),
        ])
    }
}

impl EntityProxy for SysUserProxy {
    type Entity = SysUser;

    fn from_table(table: TableHandle) -> Self {
        SysUserProxy { table }
    }

    fn table(&self) -> &TableHandle {
        &self.table
    }
}

impl SysUserProxy {
    pub fn id(&self) -> Column<i64> {
        self.table.column("id")
    }

    pub fn name(&self) -> Column<String> {
        self.table.column("name")
    }

    pub fn deleted_at(&self) -> Column<Option<i64>> {
        self.table.column("deleted_at")
    }
}

/// Row values in declaration order, for scripting driver responses.
pub fn row(values: impl IntoIterator<Item = Value>) -> Record {
    values.into_iter().collect()
}

pub fn blog_row(id: &str, title: &str, topic_id: &str) -> Record {
    Blog {
        id: id.to_string(),
        title: title.to_string(),
        content: None,
        star: 5,
        score: 1.0,
        status: 1,
        topic_id: topic_id.to_string(),
        deleted: false,
    }
    .record()
}
