//! Fixed sample posts: a few ordinary ones, then one per spam archetype

use crate::models::SamplePost;

pub const SAMPLE_POSTS: &[SamplePost] = &[
    // Normal
    SamplePost {
        text: "Just had a great coffee at the local cafe. Perfect way to start the day!",
        category: "Normal",
    },
    SamplePost {
        text: "Working on a new project today. TypeScript is really growing on me.",
        category: "Normal",
    },
    SamplePost {
        text: "Beautiful sunset tonight. Nature never fails to amaze me.",
        category: "Normal",
    },
    SamplePost {
        text: "Thanks @john for the book recommendation! Really enjoying it so far.",
        category: "Normal",
    },
    // Spam
    SamplePost {
        text: "FREE MONEY!!! CLICK HERE NOW!!! GUARANTEED RESULTS!!!",
        category: "Spam (Keywords)",
    },
    SamplePost {
        text: "WOOOOOOOW THIS IS AMAAAAAZING!!!! BUY NOW!!!!!",
        category: "Spam (Repeated chars + caps)",
    },
    SamplePost {
        text: "🎉🎉🎉🎉🎉🎉 AMAZING DEAL! 🔥🔥🔥🔥🔥 LIMITED TIME! 💰💰💰",
        category: "Spam (Excessive emojis)",
    },
    SamplePost {
        text: "Check out http://bit.ly/scam1 and http://tinyurl.com/spam2 and http://bit.ly/fake3",
        category: "Spam (Suspicious URLs)",
    },
    SamplePost {
        text: "Hey @user1 @user2 @user3 @user4 @user5 check this out!",
        category: "Spam (Excessive mentions)",
    },
    SamplePost {
        text: "Buy now! #deal #amazing #limited #time #offer #money #free #guaranteed",
        category: "Spam (Excessive hashtags)",
    },
    SamplePost {
        text: "Make money fast from home! Work from home guaranteed income! Click here!",
        category: "Spam (MLM/Scam)",
    },
    SamplePost {
        text: "1234567890",
        category: "Spam (All numbers)",
    },
];
