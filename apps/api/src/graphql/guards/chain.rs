//! Resolver guard chain
//!
//! A [`Resolver`] is a cloneable `(parent, args, context) -> result` function.
//! Guards are plain `Resolver -> Resolver` functions that check one
//! precondition and either reject or delegate to the resolver they wrap.
//! Each protected operation declares its guards as an ordered [`GuardChain`];
//! the chain is validated when it is built and then applied outer-to-inner.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::error::{ApiError, ApiResult};
use crate::graphql::context::RequestContext;
use crate::models::{Post, PostId};

type ResolverFn<P, A, T> =
    dyn Fn(P, A, RequestContext) -> BoxFuture<'static, ApiResult<T>> + Send + Sync;

/// A resolver for one field: parent value, arguments and request context in,
/// field value out
pub struct Resolver<P, A, T> {
    inner: Arc<ResolverFn<P, A, T>>,
}

impl<P, A, T> Clone for Resolver<P, A, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P, A, T> Resolver<P, A, T>
where
    P: Send + 'static,
    A: Send + 'static,
    T: Send + 'static,
{
    /// Wrap an async function as a resolver
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(P, A, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        Self {
            inner: Arc::new(
                move |parent: P, args: A, ctx: RequestContext| -> BoxFuture<'static, ApiResult<T>> {
                    f(parent, args, ctx).boxed()
                },
            ),
        }
    }

    /// Run the resolver
    pub fn call(&self, parent: P, args: A, ctx: RequestContext) -> BoxFuture<'static, ApiResult<T>> {
        (self.inner)(parent, args, ctx)
    }
}

/// Arguments a guard may need to inspect
///
/// Argument types that name a post override `post_id`; everything else keeps
/// the default.
pub trait GuardArgs {
    /// Post targeted by the operation
    fn post_id(&self) -> Option<PostId> {
        None
    }
}

impl GuardArgs for () {}

/// Reject with `Unauthenticated` unless the request carries an identity
pub fn require_authenticated<P, A, T>(next: Resolver<P, A, T>) -> Resolver<P, A, T>
where
    P: Send + 'static,
    A: Send + 'static,
    T: Send + 'static,
{
    Resolver::new(move |parent, args, ctx: RequestContext| {
        let checked = ctx.me().map(|_| ());
        let next = next.clone();
        async move {
            checked?;
            next.call(parent, args, ctx).await
        }
    })
}

/// Reject with `NotFound` unless `args.post_id` names an existing post
pub fn require_post_exists<P, A, T>(next: Resolver<P, A, T>) -> Resolver<P, A, T>
where
    P: Send + 'static,
    A: GuardArgs + Send + 'static,
    T: Send + 'static,
{
    Resolver::new(move |parent, args: A, ctx: RequestContext| {
        let checked = target_post(&args, &ctx).map(|_| ());
        let next = next.clone();
        async move {
            checked?;
            next.call(parent, args, ctx).await
        }
    })
}

/// Reject with `Forbidden` unless the caller wrote the targeted post
///
/// Reads both the identity and the post, so it belongs after
/// [`Guard::Authenticated`] and [`Guard::PostExists`] in a chain.
pub fn require_post_author<P, A, T>(next: Resolver<P, A, T>) -> Resolver<P, A, T>
where
    P: Send + 'static,
    A: GuardArgs + Send + 'static,
    T: Send + 'static,
{
    Resolver::new(move |parent, args: A, ctx: RequestContext| {
        let checked = check_post_author(&args, &ctx);
        let next = next.clone();
        async move {
            checked?;
            next.call(parent, args, ctx).await
        }
    })
}

fn target_post<A: GuardArgs>(args: &A, ctx: &RequestContext) -> ApiResult<Post> {
    let post_id = args
        .post_id()
        .ok_or_else(|| ApiError::InvalidArgument("postId is required".to_string()))?;

    ctx.store()
        .find_post(post_id)
        .ok_or_else(|| ApiError::not_found("post", post_id))
}

fn check_post_author<A: GuardArgs>(args: &A, ctx: &RequestContext) -> ApiResult<()> {
    let me = ctx.me()?;
    let post = target_post(args, ctx)?;

    if post.author_id != me.id {
        tracing::debug!(post_id = post.id, user_id = me.id, "Caller is not the post author");
        return Err(ApiError::Forbidden(
            "only the author can modify this post".to_string(),
        ));
    }

    Ok(())
}

/// Precondition a protected operation can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Request must carry an identity
    Authenticated,
    /// `postId` argument must name an existing post
    PostExists,
    /// Caller must be the author of the `postId` post
    PostAuthor,
}

impl Guard {
    /// Guards that must appear earlier in the same chain
    fn prerequisites(self) -> &'static [Guard] {
        match self {
            Self::Authenticated | Self::PostExists => &[],
            Self::PostAuthor => &[Self::Authenticated, Self::PostExists],
        }
    }

    fn apply<P, A, T>(self, next: Resolver<P, A, T>) -> Resolver<P, A, T>
    where
        P: Send + 'static,
        A: GuardArgs + Send + 'static,
        T: Send + 'static,
    {
        match self {
            Self::Authenticated => require_authenticated(next),
            Self::PostExists => require_post_exists(next),
            Self::PostAuthor => require_post_author(next),
        }
    }
}

/// Ordered list of guards for one operation, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardChain {
    guards: Vec<Guard>,
}

impl GuardChain {
    /// Chain with no guards
    pub fn open() -> Self {
        Self::default()
    }

    /// Build a chain, checking that every guard's prerequisites come first
    ///
    /// # Errors
    /// - `ApiError::Configuration` if a guard is listed twice or precedes a
    ///   guard it depends on
    pub fn new(guards: impl IntoIterator<Item = Guard>) -> ApiResult<Self> {
        let guards: Vec<Guard> = guards.into_iter().collect();

        for (position, guard) in guards.iter().enumerate() {
            let earlier = &guards[..position];

            if earlier.contains(guard) {
                return Err(ApiError::Configuration(format!(
                    "guard {:?} listed twice",
                    guard
                )));
            }

            if let Some(missing) = guard
                .prerequisites()
                .iter()
                .find(|&&required| !earlier.contains(&required))
            {
                return Err(ApiError::Configuration(format!(
                    "guard {:?} must come after {:?}",
                    guard, missing
                )));
            }
        }

        Ok(Self { guards })
    }

    /// Guards in declaration order
    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    /// Wrap `base` so the first declared guard runs first
    pub fn wrap<P, A, T>(&self, base: Resolver<P, A, T>) -> Resolver<P, A, T>
    where
        P: Send + 'static,
        A: GuardArgs + Send + 'static,
        T: Send + 'static,
    {
        self.guards
            .iter()
            .rev()
            .fold(base, |next, guard| guard.apply(next))
    }
}
